use thiserror::Error;

/// Failure category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input, caught before anything is submitted
    Validation,
    /// Capture device could not be acquired
    Resource,
    /// Non-success response or network failure
    Transport,
    /// Backend response is missing expected keys
    DataShape,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid JSON in {file}: {reason}")]
    InvalidJson { file: String, reason: String },

    #[error("Missing required file: {0}")]
    MissingFile(String),

    #[error("Unsupported file type: {file} (allowed: {allowed})")]
    UnsupportedFile { file: String, allowed: String },

    #[error("File too large: {file} is {size} bytes (limit {limit})")]
    FileTooLarge { file: String, size: usize, limit: usize },

    #[error("Could not read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Response is missing expected key: {0}")]
    MissingKey(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend request failed ({status}): {message}")]
    Transport { status: u16, message: String },

    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("A submission is already in progress")]
    Busy,

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidJson { .. }
            | AnalysisError::MissingFile(_)
            | AnalysisError::UnsupportedFile { .. }
            | AnalysisError::FileTooLarge { .. }
            | AnalysisError::Io { .. }
            | AnalysisError::InvalidField { .. }
            | AnalysisError::Busy
            | AnalysisError::InvalidState(_) => ErrorKind::Validation,
            AnalysisError::DeviceUnavailable(_) => ErrorKind::Resource,
            AnalysisError::Transport { .. } => ErrorKind::Transport,
            AnalysisError::MissingKey(_) | AnalysisError::MalformedResponse(_) => {
                ErrorKind::DataShape
            }
        }
    }

    /// Every failure is scoped to one operation; the rest of the system stays usable.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Network failure before any status line was received.
    pub fn network(message: impl Into<String>) -> Self {
        AnalysisError::Transport {
            status: 0,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
