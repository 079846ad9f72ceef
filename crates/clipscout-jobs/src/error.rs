//! Job execution error types.
//!
//! A [`JobError`]'s display string becomes the failed job's error message,
//! so variants spell out what went wrong in client-readable terms.

use thiserror::Error;

use clipscout_engine::EngineError;
use clipscout_media::MediaError;
use clipscout_models::ConfigError;

pub type JobResult<T> = Result<T, JobError>;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Audio acquisition failed: {0}")]
    Acquire(#[from] MediaError),

    #[error("Audio acquisition timed out after {0} seconds")]
    AcquireTimeout(u64),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] EngineError),

    #[error("Workspace error: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
