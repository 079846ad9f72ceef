//! HTTP client for the Whisper transcription service.
//!
//! Transcription is a best-effort collaborator: an unconfigured service,
//! a failed request, or a timeout all collapse into
//! [`Transcription::Unavailable`](clipscout_models::Transcription) so the
//! analysis pipeline can continue without keyword signals.

pub mod client;
pub mod error;
pub mod types;

pub use client::{WhisperClient, WhisperConfig};
pub use error::{AsrError, AsrResult};
