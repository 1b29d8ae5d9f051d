use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    #[error("{contract} has no method '{method}'")]
    UnknownMethod { contract: String, method: String },

    #[error("{contract}.{method} expects {expected} arguments, got {actual}")]
    ArityMismatch {
        contract: String,
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("{contract}.{method} was called but has no programmed response")]
    NotProgrammed { contract: String, method: String },

    #[error("Argument index {index} out of range for {method} ({len} arguments)")]
    ArgumentOutOfRange {
        method: String,
        index: usize,
        len: usize,
    },

    #[error("Unsupported JSON value for a stub response: {0}")]
    UnsupportedJson(String),

    #[error("Invalid interface descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Call handler for {method} failed: {reason}")]
    HandlerFailed { method: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MockError>;
