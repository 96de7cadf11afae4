//! SVG chart rendering for strategy-versus-baseline trajectories.

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

/// Render both investment trajectories as polylines on shared axes.
/// Trajectories may differ in length (the baseline carries a leading
/// principal entry); each is scaled over the same value range.
pub fn render_comparison_chart(strategy: &[f64], baseline: &[f64]) -> String {
    if strategy.is_empty() && baseline.is_empty() {
        return "<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_string();
    }

    let min_value = strategy
        .iter()
        .chain(baseline.iter())
        .fold(f64::INFINITY, |a, &b| a.min(b));
    let max_value = strategy
        .iter()
        .chain(baseline.iter())
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    let strategy_points = polyline_points(strategy, min_value, max_value);
    let baseline_points = polyline_points(baseline, min_value, max_value);

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <rect width="{w:.0}" height="{h:.0}" fill="white"/>
  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{bottom:.0}" stroke="black"/>
  <line x1="{p:.0}" y1="{bottom:.0}" x2="{right:.0}" y2="{bottom:.0}" stroke="black"/>
  <polyline fill="none" stroke="grey" stroke-opacity="0.6" points="{baseline}"/>
  <polyline fill="none" stroke="blue" points="{strategy}"/>
</svg>
"#,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        baseline = baseline_points,
        strategy = strategy_points,
    )
}

fn polyline_points(values: &[f64], min_value: f64, max_value: f64) -> String {
    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_value - min_value;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if values.len() > 1 {
        plot_width / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (value - min_value) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
