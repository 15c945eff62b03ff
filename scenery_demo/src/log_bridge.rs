//! Forwards engine log entries to the `log` facade
//!
//! Lets the demo pick its output with `RUST_LOG` (through `env_logger`)
//! instead of the engine's colored console logger.

use scenery_engine::scenery::log::{LogEntry, LogSeverity, Logger};

pub struct LogFacadeBridge;

impl Logger for LogFacadeBridge {
    fn log(&self, entry: &LogEntry) {
        let level = match entry.severity {
            LogSeverity::Trace => log::Level::Trace,
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warn => log::Level::Warn,
            LogSeverity::Error => log::Level::Error,
        };

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                log::log!(target: entry.source.as_str(), level, "{} ({}:{})", entry.message, file, line)
            }
            _ => log::log!(target: entry.source.as_str(), level, "{}", entry.message),
        }
    }
}
