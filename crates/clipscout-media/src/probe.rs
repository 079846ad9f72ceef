//! Media inspection via ffprobe.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::command::check_ffprobe;
use crate::error::{MediaError, MediaResult};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
}

/// Probe a media file for its duration in seconds, verifying that it
/// carries at least one audio stream.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }
    check_ffprobe()?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: format!("FFprobe failed for {}", path.display()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let duration = parse_probe_output(&output.stdout)?;
    debug!(path = %path.display(), duration_secs = duration, "Probed media file");
    Ok(duration)
}

/// Parse ffprobe's JSON output into a duration, rejecting files without an
/// audio stream.
fn parse_probe_output(bytes: &[u8]) -> MediaResult<f64> {
    let probe: FfprobeOutput = serde_json::from_slice(bytes)?;

    let has_audio = probe
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));
    if !has_audio {
        return Err(MediaError::NoAudioData);
    }

    probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MediaError::FfprobeFailed {
            message: "No duration in probe output".to_string(),
            stderr: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output() {
        let json = br#"{
            "format": {"duration": "123.456"},
            "streams": [
                {"codec_type": "video"},
                {"codec_type": "audio"}
            ]
        }"#;
        let duration = parse_probe_output(json).unwrap();
        assert!((duration - 123.456).abs() < 1e-9);
    }

    #[test]
    fn test_parse_probe_output_no_audio_stream() {
        let json = br#"{
            "format": {"duration": "10.0"},
            "streams": [{"codec_type": "video"}]
        }"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(MediaError::NoAudioData)
        ));
    }

    #[test]
    fn test_parse_probe_output_missing_duration() {
        let json = br#"{
            "format": {},
            "streams": [{"codec_type": "audio"}]
        }"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(MediaError::FfprobeFailed { .. })
        ));
    }

    #[test]
    fn test_parse_probe_output_invalid_json() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(MediaError::JsonParse(_))
        ));
    }
}
