//! Concrete port implementations.

pub mod chart_svg;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
pub mod ticker_file_adapter;
