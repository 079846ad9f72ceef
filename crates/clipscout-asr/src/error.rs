//! Transcription client error types.

use thiserror::Error;

pub type AsrResult<T> = Result<T, AsrError>;

#[derive(Debug, Error)]
pub enum AsrError {
    #[error("transcription service not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
