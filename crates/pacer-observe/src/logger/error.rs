use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?}; use text, json or journald")]
    InvalidFormat(String),

    #[error("invalid log filter {directive:?}: {reason}")]
    InvalidLevel { directive: String, reason: String },

    #[error("journald output needs Linux and the `journald` feature")]
    JournaldUnavailable,

    #[error("journald: {0}")]
    Journald(String),

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}
