//! Source downloads: YouTube via yt-dlp, direct links via HTTP.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::command::check_ytdlp;
use crate::error::{MediaError, MediaResult};

/// Download the audio of a YouTube video as a WAV file and return its path.
pub async fn download_youtube_audio(url: &str, workdir: &Path) -> MediaResult<PathBuf> {
    check_ytdlp()?;

    let output_template = workdir.join("source.%(ext)s");
    let wav_path = workdir.join("source.wav");

    info!(url = %url, "Downloading YouTube audio");

    let output = Command::new("yt-dlp")
        .args([
            "-f",
            "bestaudio/best",
            "-x",
            "--audio-format",
            "wav",
            "--no-playlist",
            "-o",
        ])
        .arg(&output_template)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed: {}",
            stderr.lines().last().unwrap_or("unknown error")
        )));
    }

    if !wav_path.exists() {
        return Err(MediaError::download_failed(
            "yt-dlp did not produce a WAV file",
        ));
    }

    Ok(wav_path)
}

/// Rewrite a Dropbox share link into a direct download link. Non-Dropbox
/// URLs pass through unchanged.
pub fn normalize_direct_url(url: &str) -> String {
    let url = url.trim();
    if !url.contains("dropbox.com") {
        return url.to_string();
    }
    if url.contains("dl=0") {
        return url.replacen("dl=0", "dl=1", 1);
    }
    if url.contains("dl=1") {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}dl=1")
}

/// Download a direct media link into the working directory and return the
/// file path.
pub async fn download_direct(
    client: &reqwest::Client,
    url: &str,
    workdir: &Path,
) -> MediaResult<PathBuf> {
    let download_url = normalize_direct_url(url);
    let output_path = workdir.join("source.media");

    info!(url = %download_url, "Downloading media from direct link");

    let mut response = client
        .get(&download_url)
        .send()
        .await
        .map_err(|e| MediaError::download_failed(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::download_failed(format!(
            "server returned {status}"
        )));
    }

    let mut file = tokio::fs::File::create(&output_path).await?;
    let mut bytes_written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| MediaError::download_failed(format!("read failed: {e}")))?
    {
        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await?;

    if bytes_written == 0 {
        return Err(MediaError::download_failed("server returned an empty body"));
    }

    debug!(bytes = bytes_written, path = %output_path.display(), "Direct download complete");
    Ok(output_path)
}
