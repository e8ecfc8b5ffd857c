/// Error type for logger setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The level filter could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    /// Unknown output format name.
    #[error("unknown log format '{0}' (expected pretty, compact or json)")]
    Format(String),

    /// A global subscriber was already installed.
    #[error("logger already initialized: {0}")]
    Init(String),
}

impl LogError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Filter { .. } => "LOG_FILTER",
            Self::Format(_) => "LOG_FORMAT",
            Self::Init(_) => "LOG_INIT",
        }
    }
}

/// Result type for logger setup.
pub type LogResult<T> = Result<T, LogError>;
