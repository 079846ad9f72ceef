//! In-memory job registry.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::warn;

use clipscout_models::{Clip, Job, JobId};

/// Tracks every job this process has accepted. Reads return point-in-time
/// clones, so a caller never observes a job mid-transition. Terminal jobs
/// are immutable; transitions on them are ignored.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new job snapshot.
    pub async fn insert(&self, job: Job) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Fetch a snapshot of a job.
    pub async fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Number of jobs tracked.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Transition a job to completed. Returns false if the job is unknown
    /// or already terminal.
    pub async fn complete(&self, id: &JobId, clips: Vec<Clip>) -> bool {
        self.transition(id, |job| job.complete(clips)).await
    }

    /// Transition a job to failed. Returns false if the job is unknown or
    /// already terminal.
    pub async fn fail(&self, id: &JobId, error: impl Into<String>) -> bool {
        let error = error.into();
        self.transition(id, |job| job.fail(error)).await
    }

    async fn transition<F>(&self, id: &JobId, apply: F) -> bool
    where
        F: FnOnce(Job) -> Job,
    {
        let mut jobs = self.jobs.write().await;
        match jobs.get(id) {
            Some(job) if job.status.is_terminal() => {
                warn!(
                    job_id = %id,
                    status = job.status.as_str(),
                    "Ignoring transition for terminal job"
                );
                false
            }
            Some(job) => {
                let updated = apply(job.clone());
                jobs.insert(id.clone(), updated);
                true
            }
            None => {
                warn!(job_id = %id, "Ignoring transition for unknown job");
                false
            }
        }
    }
}
