//! Diagnostic output on stderr.
//!
//! Records tailed from a producer go to stdout in the selected
//! [`OutputFormat`](crate::output::OutputFormat); everything logtap says
//! about itself (attach/detach, endpoint lifecycle) goes through `tracing`
//! to stderr, so piping record output stays clean.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// One human-oriented line per event.
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Suppress diagnostics entirely; record output is unaffected.
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the process-wide stderr subscriber. A repeated call (tests) is a
/// no-op.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.compact().try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_matching_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::OFF);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn off_level_parses_from_cli_value() {
        let level = LogLevel::from_str("off", true).expect("off should be a valid level");
        assert_eq!(level, LogLevel::Off);
    }
}
