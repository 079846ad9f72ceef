//! Application state.

use std::sync::Arc;

use clipscout_asr::{WhisperClient, WhisperConfig};
use clipscout_jobs::{JobOrchestrator, MediaAcquirer, OrchestratorConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub orchestrator: Arc<JobOrchestrator>,
    /// Whether a transcription backend is configured. Jobs still run
    /// without one; this only feeds the readiness report.
    pub transcription_configured: bool,
}

impl AppState {
    /// Create new application state from the environment.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let orchestrator_config = OrchestratorConfig::from_env();

        let acquirer = MediaAcquirer::new(orchestrator_config.acquire_timeout);

        let whisper_config =
            WhisperConfig::from_env().with_timeout(orchestrator_config.transcribe_timeout);
        let whisper = WhisperClient::new(whisper_config)?;
        let transcription_configured = whisper.is_configured();

        let orchestrator = Arc::new(JobOrchestrator::new(
            orchestrator_config,
            Arc::new(acquirer),
            Arc::new(whisper),
        ));

        Ok(Self {
            config,
            orchestrator,
            transcription_configured,
        })
    }

    /// Assemble state around an existing orchestrator. Used by tests and
    /// embedders that wire their own collaborators.
    pub fn with_orchestrator(
        config: ApiConfig,
        orchestrator: Arc<JobOrchestrator>,
        transcription_configured: bool,
    ) -> Self {
        Self {
            config,
            orchestrator,
            transcription_configured,
        }
    }
}
