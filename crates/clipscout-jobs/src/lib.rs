//! Job orchestration for ClipScout.
//!
//! Owns the lifecycle of highlight jobs: an in-memory registry of job
//! snapshots, collaborator seams for audio acquisition and transcription,
//! and the orchestrator that drives a submitted job through acquisition,
//! transcription, and analysis to a terminal state.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod traits;

pub use config::OrchestratorConfig;
pub use error::{JobError, JobResult};
pub use orchestrator::JobOrchestrator;
pub use registry::JobRegistry;
pub use traits::{AcquireAudio, MediaAcquirer, ProvideTranscript};
