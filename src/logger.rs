use std::io::IsTerminal;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "RDV_LOG";

/// Logging setup for the `rdv-tour` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// `EnvFilter` directives, e.g. `info` or `rdv=trace`.
    pub level: String,
    /// Print the event target next to each line.
    pub with_targets: bool,
    /// Emit ANSI colour codes.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_targets: true,
            use_color: std::io::stderr().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Defaults, with the level taken from [`LOG_ENV`] when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(LOG_ENV) {
            config.level = level;
        }
        config
    }
}

/// Error kind for [`logger_init`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoggerError {
    /// The level is not valid `EnvFilter` syntax.
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    /// A global subscriber is already installed.
    #[error("logger has already been initialized")]
    AlreadyInitialized,
}

/// Installs a text subscriber writing to stderr; stdout stays reserved for
/// the tour itself.
///
/// # Errors
/// If the level does not parse or a global subscriber is already set.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_new(&cfg.level)
        .map_err(|_| LoggerError::InvalidLogLevel(cfg.level.clone()))?;
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg.use_color)
        .with_target(cfg.with_targets);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_level_is_rejected() {
        let cfg = LoggerConfig {
            level: "rdv=shouting".to_string(),
            ..LoggerConfig::default()
        };
        let err = logger_init(&cfg).unwrap_err();
        assert_eq!(err.to_string(), "invalid log level: rdv=shouting");
        assert!(matches!(err, LoggerError::InvalidLogLevel(level) if level == "rdv=shouting"));
    }
}
