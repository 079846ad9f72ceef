//! Audio-signal highlight ranking for ClipScout.
//!
//! This crate implements the pure analysis pipeline:
//! 1. Slice mono PCM into fixed-duration frames with RMS energy
//! 2. Map normalized energy to speech activity
//! 3. Slide candidate windows and aggregate per-window signals
//! 4. Optionally score transcript keyword relevance
//! 5. Combine signals, rank, and explain the top clips
//!
//! Everything here is synchronous and deterministic. Audio acquisition and
//! transcription live in their own crates and feed this one.

pub mod activity;
pub mod candidates;
pub mod error;
pub mod explain;
pub mod frames;
pub mod keywords;
pub mod pipeline;
pub mod scoring;

pub use candidates::Candidate;
pub use error::{EngineError, EngineResult};
pub use frames::AudioFrame;
pub use keywords::KeywordTable;
pub use pipeline::rank_highlights;
