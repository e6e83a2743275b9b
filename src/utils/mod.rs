pub mod config;
pub mod errors;

pub use config::{ApiConfig, AppConfig, LoggingConfig, OutputConfig, PacingConfig};
pub use errors::{Result, TranslatorError};

/// Renders a float cell the way a spreadsheet shows it: integral values without a decimal point.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
