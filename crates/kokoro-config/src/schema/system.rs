//! System configuration types: logging.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for this level, scoped to kokoro crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "kokoro=trace",
            LogLevel::Debug => "kokoro=debug",
            LogLevel::Info => "kokoro=info",
            LogLevel::Warning => "kokoro=warn",
            LogLevel::Error => "kokoro=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_uppercase() {
        let cfg: LoggingConfig = toml::from_str("level = \"DEBUG\"").unwrap();
        assert_eq!(cfg.level, LogLevel::Debug);
    }

    #[test]
    fn directive_targets_kokoro() {
        assert_eq!(LogLevel::Warning.directive(), "kokoro=warn");
        assert_eq!(LogLevel::default().directive(), "kokoro=info");
    }
}
