/// Hard failures raised while building a service instance.
///
/// These abort construction before validation or the action runs. Failed
/// validation rules are not errors in this sense; they are collected as
/// [`ValidationErrors`](telephone_validator::ValidationErrors) on the instance.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// One or more required arguments were not supplied as keys.
    #[error("missing required argument(s): {}", .names.join(", "))]
    MissingArgument { names: Vec<String> },

    /// A supplied key names no declared argument.
    #[error("unknown argument `{name}`")]
    UnknownArgument { name: String },

    /// A stored value could not be read as the requested type.
    #[error("invalid type for `{name}`: {source}")]
    InvalidType {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::MissingArgument { .. } => "SERVICE_MISSING_ARGUMENT",
            Self::UnknownArgument { .. } => "SERVICE_UNKNOWN_ARGUMENT",
            Self::InvalidType { .. } => "SERVICE_INVALID_TYPE",
        }
    }

    /// The argument names this error refers to.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::MissingArgument { names } => names.iter().map(String::as_str).collect(),
            Self::UnknownArgument { name } | Self::InvalidType { name, .. } => vec![name.as_str()],
        }
    }
}
