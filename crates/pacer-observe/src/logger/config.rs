use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat, level::LoggerLevel};

/// Environment variable holding the filter directive.
pub const ENV_LEVEL: &str = "PACER_LOG";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "PACER_LOG_FORMAT";
/// Environment variable that forces colors on (`1`/`true`) or off (anything else).
pub const ENV_COLOR: &str = "PACER_LOG_COLOR";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: std::io::stdout().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by `PACER_LOG`, `PACER_LOG_FORMAT` and `PACER_LOG_COLOR`.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] over an arbitrary variable source.
    ///
    /// Unset or blank variables keep the default; malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(level) = var(ENV_LEVEL) {
            cfg.level = LoggerLevel::new(level)?;
        }
        if let Some(format) = var(ENV_FORMAT) {
            cfg.format = format.parse()?;
        }
        if let Some(color) = var(ENV_COLOR) {
            cfg.use_color = matches!(color.trim(), "1" | "true");
        }
        if cfg.format != LoggerFormat::Text {
            cfg.use_color = false;
        }
        Ok(cfg)
    }
}
