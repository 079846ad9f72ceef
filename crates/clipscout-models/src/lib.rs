//! Shared data models for the ClipScout backend.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and ranked highlight clips
//! - Transcript segments and transcription outcomes
//! - Media source descriptors
//! - Highlight ranking configuration

pub mod clip;
pub mod config;
pub mod job;
pub mod source;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use clip::Clip;
pub use config::{ConfigError, HighlightConfig, ScoreWeights};
pub use job::{Job, JobId, JobStatus};
pub use source::MediaSource;
pub use transcript::{TranscriptSegment, Transcription};
