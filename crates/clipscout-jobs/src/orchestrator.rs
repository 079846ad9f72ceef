//! Job orchestration: bounded execution from submission to terminal state.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use clipscout_engine::rank_highlights;
use clipscout_models::{Clip, HighlightConfig, Job, JobId, MediaSource, Transcription};

use crate::config::OrchestratorConfig;
use crate::error::{JobError, JobResult};
use crate::registry::JobRegistry;
use crate::traits::{AcquireAudio, ProvideTranscript};

mod metric_names {
    pub const JOBS_SUBMITTED_TOTAL: &str = "clipscout_jobs_submitted_total";
    pub const JOBS_COMPLETED_TOTAL: &str = "clipscout_jobs_completed_total";
    pub const JOBS_FAILED_TOTAL: &str = "clipscout_jobs_failed_total";
    pub const JOB_DURATION_SECONDS: &str = "clipscout_job_duration_seconds";
    pub const CLIPS_RANKED_TOTAL: &str = "clipscout_clips_ranked_total";
}

/// Drives highlight jobs from submission to a terminal state.
///
/// Execution is bounded by a semaphore sized to `max_concurrent_jobs`.
/// Submission never waits for a slot: the job is registered as processing
/// and queues for a permit in its own task.
pub struct JobOrchestrator {
    config: OrchestratorConfig,
    registry: Arc<JobRegistry>,
    acquirer: Arc<dyn AcquireAudio>,
    transcriber: Arc<dyn ProvideTranscript>,
    job_semaphore: Arc<Semaphore>,
}

impl JobOrchestrator {
    pub fn new(
        config: OrchestratorConfig,
        acquirer: Arc<dyn AcquireAudio>,
        transcriber: Arc<dyn ProvideTranscript>,
    ) -> Self {
        let job_semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs));
        Self {
            config,
            registry: Arc::new(JobRegistry::new()),
            acquirer,
            transcriber,
            job_semaphore,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Snapshot of a job, if known.
    pub async fn job(&self, id: &JobId) -> Option<Job> {
        self.registry.get(id).await
    }

    /// Validate and accept a job. The returned snapshot is already in the
    /// processing state; acquisition and analysis continue in a background
    /// task that drives the job to completed or failed exactly once.
    pub async fn submit(
        &self,
        source: MediaSource,
        highlight_config: HighlightConfig,
    ) -> JobResult<Job> {
        highlight_config.validate()?;

        let job = Job::new();
        let job_id = job.id.clone();
        self.registry.insert(job.clone()).await;

        counter!(metric_names::JOBS_SUBMITTED_TOTAL).increment(1);
        info!(job_id = %job_id, source = source.kind(), "Job submitted");

        let config = self.config.clone();
        let registry = Arc::clone(&self.registry);
        let acquirer = Arc::clone(&self.acquirer);
        let transcriber = Arc::clone(&self.transcriber);
        let semaphore = Arc::clone(&self.job_semaphore);

        tokio::spawn(async move {
            let permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            let _permit = permit;

            let started = Instant::now();
            let result = run_job(
                &config,
                acquirer.as_ref(),
                transcriber.as_ref(),
                &job_id,
                &source,
                &highlight_config,
            )
            .await;
            let elapsed = started.elapsed().as_secs_f64();
            histogram!(metric_names::JOB_DURATION_SECONDS).record(elapsed);

            match result {
                Ok(clips) => {
                    counter!(metric_names::JOBS_COMPLETED_TOTAL).increment(1);
                    counter!(metric_names::CLIPS_RANKED_TOTAL).increment(clips.len() as u64);
                    info!(
                        job_id = %job_id,
                        clips = clips.len(),
                        elapsed_secs = elapsed,
                        "Job completed"
                    );
                    registry.complete(&job_id, clips).await;
                }
                Err(e) => {
                    counter!(metric_names::JOBS_FAILED_TOTAL).increment(1);
                    error!(job_id = %job_id, error = %e, "Job failed");
                    registry.fail(&job_id, e.to_string()).await;
                }
            }
        });

        Ok(job)
    }
}

/// Run one job through acquisition, transcription, and analysis.
///
/// Acquisition failures and timeouts are fatal. Transcription problems are
/// not: a timeout degrades to an unavailable transcript and analysis
/// proceeds on audio signals alone.
async fn run_job(
    config: &OrchestratorConfig,
    acquirer: &dyn AcquireAudio,
    transcriber: &dyn ProvideTranscript,
    job_id: &JobId,
    source: &MediaSource,
    highlight_config: &HighlightConfig,
) -> JobResult<Vec<Clip>> {
    tokio::fs::create_dir_all(&config.work_dir).await?;
    let workdir = tempfile::Builder::new()
        .prefix(&format!("job-{}-", job_id))
        .tempdir_in(&config.work_dir)?;

    let track = match tokio::time::timeout(
        config.acquire_timeout,
        acquirer.acquire(source, workdir.path()),
    )
    .await
    {
        Ok(result) => result?,
        Err(_) => return Err(JobError::AcquireTimeout(config.acquire_timeout.as_secs())),
    };

    debug!(
        job_id = %job_id,
        duration_secs = track.duration_secs(),
        "Audio ready for analysis"
    );

    let transcription = match tokio::time::timeout(
        config.transcribe_timeout,
        transcriber.transcribe(&track.wav_path),
    )
    .await
    {
        Ok(transcription) => transcription,
        Err(_) => {
            warn!(
                job_id = %job_id,
                timeout_secs = config.transcribe_timeout.as_secs(),
                "Transcription timed out, continuing without transcript"
            );
            Transcription::unavailable(format!(
                "transcription timed out after {} seconds",
                config.transcribe_timeout.as_secs()
            ))
        }
    };

    // Scoring is CPU-bound; keep it off the async runtime
    let samples = track.samples;
    let sample_rate = track.sample_rate;
    let analysis_config = highlight_config.clone();
    let clips = tokio::task::spawn_blocking(move || {
        rank_highlights(&samples, sample_rate, &analysis_config, &transcription)
    })
    .await
    .map_err(|e| JobError::Internal(format!("analysis task panicked: {e}")))??;

    Ok(clips)
}
