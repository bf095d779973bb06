use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::str::FromStr;

use crate::error::{Result, StegoError};

/// Parse a level name such as `"info"` or `"debug"`.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level)
        .map_err(|_| StegoError::Configuration(format!("invalid log level '{}'", level)))
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`
pub fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}
