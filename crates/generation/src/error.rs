use std::time::Duration;

use thiserror::Error;

/// Errors raised along the submit / poll / fetch / encode path.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The job finished but produced no usable result handles.
    #[error("no videos generated")]
    EmptyResult,

    /// Retrieving the binary content of a result failed.
    #[error("failed to fetch video: {status} {status_text}")]
    Fetch { status: u16, status_text: String },

    /// Submit, poll or fetch could not reach the service.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("generation cancelled")]
    Cancelled,

    #[error("job still running after {attempts} status checks")]
    PollLimitExceeded { attempts: u32 },

    #[error("job still running after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },
}

impl GenerationError {
    pub fn transport(msg: impl Into<String>) -> Self {
        GenerationError::Transport(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        GenerationError::InvalidResponse(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        GenerationError::Configuration(msg.into())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::InvalidResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
