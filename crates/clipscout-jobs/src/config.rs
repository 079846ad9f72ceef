//! Orchestrator configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum jobs analyzed concurrently
    pub max_concurrent_jobs: usize,
    /// Wall-clock bound on audio acquisition; exceeding it fails the job
    pub acquire_timeout: Duration,
    /// Wall-clock bound on transcription; exceeding it degrades to
    /// no-transcript analysis
    pub transcribe_timeout: Duration,
    /// Directory for per-job working directories
    pub work_dir: PathBuf,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 4,
            acquire_timeout: Duration::from_secs(300),
            transcribe_timeout: Duration::from_secs(120),
            work_dir: PathBuf::from("/tmp/clipscout"),
        }
    }
}

impl OrchestratorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_jobs: std::env::var("CLIPSCOUT_MAX_CONCURRENT_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            acquire_timeout: Duration::from_secs(
                std::env::var("CLIPSCOUT_ACQUIRE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            transcribe_timeout: Duration::from_secs(
                std::env::var("CLIPSCOUT_TRANSCRIBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            work_dir: std::env::var("CLIPSCOUT_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/clipscout")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.max_concurrent_jobs, 4);
        assert_eq!(config.acquire_timeout, Duration::from_secs(300));
        assert_eq!(config.transcribe_timeout, Duration::from_secs(120));
        assert_eq!(config.work_dir, PathBuf::from("/tmp/clipscout"));
    }
}
