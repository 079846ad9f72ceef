//! Acquisition entry point: media source to analysis-ready audio.

use std::path::Path;
use std::time::Duration;
use tracing::info;

use clipscout_models::MediaSource;

use crate::download;
use crate::error::{MediaError, MediaResult};
use crate::extract::{self, AudioTrack};
use crate::probe;

/// Resolve a media source into an audio track inside the job's working
/// directory. Uploads are read in place; link sources are downloaded first.
/// The input is probed before extraction so files without an audio stream
/// are rejected up front.
pub async fn acquire_audio_track(
    client: &reqwest::Client,
    source: &MediaSource,
    workdir: &Path,
    ffmpeg_timeout: Duration,
) -> MediaResult<AudioTrack> {
    let input = match source {
        MediaSource::Upload { path } => {
            if !path.exists() {
                return Err(MediaError::FileNotFound(path.clone()));
            }
            path.clone()
        }
        MediaSource::Youtube { url } => download::download_youtube_audio(url, workdir).await?,
        MediaSource::DirectUrl { url } => download::download_direct(client, url, workdir).await?,
    };

    let duration = probe::probe_duration(&input).await?;
    info!(
        source = source.kind(),
        input = %input.display(),
        duration_secs = duration,
        "Acquired source media"
    );

    extract::extract_audio_track(&input, workdir, ffmpeg_timeout).await
}
