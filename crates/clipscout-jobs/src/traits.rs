//! Collaborator seams for the orchestrator.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use clipscout_asr::WhisperClient;
use clipscout_media::{AudioTrack, MediaError};
use clipscout_models::{MediaSource, Transcription};

/// Resolves a media source into an analysis-ready audio track inside the
/// job's working directory.
#[async_trait]
pub trait AcquireAudio: Send + Sync {
    async fn acquire(&self, source: &MediaSource, workdir: &Path)
        -> Result<AudioTrack, MediaError>;
}

/// Produces a transcription for an extracted WAV. Implementations report
/// problems as [`Transcription::Unavailable`] instead of errors, so a
/// missing transcript can never fail a job.
#[async_trait]
pub trait ProvideTranscript: Send + Sync {
    async fn transcribe(&self, wav_path: &Path) -> Transcription;
}

/// Production acquirer backed by the downloaders and FFmpeg.
pub struct MediaAcquirer {
    client: reqwest::Client,
    ffmpeg_timeout: Duration,
}

impl MediaAcquirer {
    pub fn new(ffmpeg_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            ffmpeg_timeout,
        }
    }
}

#[async_trait]
impl AcquireAudio for MediaAcquirer {
    async fn acquire(
        &self,
        source: &MediaSource,
        workdir: &Path,
    ) -> Result<AudioTrack, MediaError> {
        clipscout_media::acquire_audio_track(&self.client, source, workdir, self.ffmpeg_timeout)
            .await
    }
}

#[async_trait]
impl ProvideTranscript for WhisperClient {
    async fn transcribe(&self, wav_path: &Path) -> Transcription {
        WhisperClient::transcribe(self, wav_path).await
    }
}
