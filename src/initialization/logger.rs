//! Logger initialization.
//!
//! Plain output is colored with one emoji per level; JSON output writes one
//! object per line for log shippers.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first, then `level` overrides it for this crate, so
/// `--log-level` (or `--debug`) always wins for our own records while
/// `RUST_LOG` can still tune noisy dependencies.
///
/// ```bash
/// RUST_LOG=reqwest=debug booru_proxy --log-level info
/// booru_proxy --log-format json
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("booru_proxy", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let (emoji, colored_level) = match level {
                    log::Level::Error => ("❌", level.to_string().red()),
                    log::Level::Warn => ("⚠️", level.to_string().yellow()),
                    log::Level::Info => ("✔️", level.to_string().green()),
                    log::Level::Debug => ("🔍", level.to_string().blue()),
                    log::Level::Trace => ("🔬", level.to_string().purple()),
                };

                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // env_logger installs at most once per process, so only the first call
    // in the test binary can succeed. Later calls must fail cleanly.

    #[test]
    fn test_init_logger_second_call_is_an_error() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_init_logger_does_not_panic_for_any_level() {
        for level in [
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ] {
            let _ = init_logger_with(level, LogFormat::Plain);
        }
    }
}
