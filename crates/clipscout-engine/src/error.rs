//! Errors from the ranking pipeline.

use thiserror::Error;

/// Errors from highlight analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("audio too short for analysis: {samples} samples, need at least {needed}")]
    AudioTooShort { samples: usize, needed: usize },

    #[error("invalid sample rate: {0} Hz yields empty analysis frames")]
    InvalidSampleRate(u32),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
