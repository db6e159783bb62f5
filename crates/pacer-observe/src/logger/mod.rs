mod config;
mod error;
mod format;
mod level;
mod log;

pub use config::{ENV_COLOR, ENV_FORMAT, ENV_LEVEL, LoggerConfig};
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use level::LoggerLevel;

/// Install the process-wide `tracing` subscriber described by `cfg`.
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::install(cfg)
}
