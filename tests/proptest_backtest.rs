//! Property tests for the backtest engine invariants.

mod common;

use common::make_series;
use meanrev::domain::backtest::run_backtest;
use meanrev::domain::baseline::buy_and_hold;
use meanrev::domain::rule::TradingRule;
use meanrev::domain::scoring::score;
use proptest::prelude::*;

fn arbitrary_rule() -> impl Strategy<Value = TradingRule> {
    prop_oneof![
        (0.5f64..4.0).prop_map(|band_width| TradingRule::FixedBand { band_width }),
        (0.5f64..4.0, 0.5f64..4.0).prop_map(|(buy_range, sell_range)| TradingRule::Tilted {
            buy_range,
            sell_range
        }),
    ]
}

proptest! {
    /// Wins can never outnumber opened trades, and closed trades can never
    /// outnumber opened ones.
    #[test]
    fn ledger_counts_are_consistent(
        closes in prop::collection::vec(1.0f64..500.0, 10..120),
        scope in 2usize..8,
        rule in arbitrary_rule(),
    ) {
        let series = make_series("TEST", &closes);
        let result = run_backtest(&series, 100.0, scope, &rule).unwrap();

        prop_assert!(result.ledger.trades_won <= result.ledger.trades_opened);
        let open = usize::from(result.open_position.is_some());
        prop_assert_eq!(result.ledger.closed.len() + open, result.ledger.trades_opened);
    }

    /// One trajectory entry per evaluated step, and time in market never
    /// exceeds the evaluated step count.
    #[test]
    fn trajectory_and_market_time_bounds(
        closes in prop::collection::vec(1.0f64..500.0, 10..120),
        scope in 2usize..8,
        rule in arbitrary_rule(),
    ) {
        let series = make_series("TEST", &closes);
        let result = run_backtest(&series, 100.0, scope, &rule).unwrap();

        prop_assert_eq!(result.trajectory.len(), series.len() - scope);
        prop_assert!(result.steps_in_market <= result.trajectory.len());
    }

    /// The engine is a pure function: identical inputs give identical output.
    #[test]
    fn engine_is_deterministic(
        closes in prop::collection::vec(1.0f64..500.0, 10..120),
        scope in 2usize..8,
        rule in arbitrary_rule(),
    ) {
        let series = make_series("TEST", &closes);
        let first = run_backtest(&series, 100.0, scope, &rule).unwrap();
        let second = run_backtest(&series, 100.0, scope, &rule).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A strategy that never enters the market keeps exactly the principal,
    /// and its risk-adjusted return is 0 by definition.
    #[test]
    fn untouched_principal_when_never_in_market(
        closes in prop::collection::vec(1.0f64..500.0, 10..120),
        scope in 2usize..8,
        principal in 1.0f64..10_000.0,
    ) {
        let rule = TradingRule::FixedBand { band_width: 2.0 };
        let series = make_series("TEST", &closes);
        let result = run_backtest(&series, principal, scope, &rule).unwrap();

        if result.steps_in_market == 0 {
            prop_assert_eq!(result.final_value.to_bits(), principal.to_bits());

            let baseline = buy_and_hold(&series, principal, scope).unwrap();
            let summary = score(&result, &baseline, principal);
            prop_assert_eq!(summary.risk_adjusted_percent, 0.0);
            prop_assert_eq!(summary.win_loss_ratio, 0.0);
        }
    }
}
