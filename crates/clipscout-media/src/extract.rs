//! Audio extraction to analysis-ready PCM.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Sample rate used for analysis and transcription.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decoded audio for one job: the mono samples used by the analysis engine
/// plus a companion WAV on disk for the transcription service.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub wav_path: PathBuf,
}

impl AudioTrack {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Extract a media file's audio into a 16 kHz mono track. Produces a WAV in
/// the working directory and decodes a raw f32 dump of the same audio into
/// memory, then deletes the dump.
pub async fn extract_audio_track(
    input: &Path,
    workdir: &Path,
    timeout: Duration,
) -> MediaResult<AudioTrack> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let runner = FfmpegRunner::new().with_timeout(timeout);

    let wav_path = workdir.join("audio.wav");
    let wav_cmd = FfmpegCommand::new(input, &wav_path)
        .no_video()
        .audio_codec("pcm_s16le")
        .sample_rate(TARGET_SAMPLE_RATE)
        .channels(1);
    runner.run(&wav_cmd).await?;

    let raw_path = workdir.join("audio.f32le");
    let raw_cmd = FfmpegCommand::new(&wav_path, &raw_path)
        .audio_codec("pcm_f32le")
        .format("f32le");
    runner.run(&raw_cmd).await?;

    let samples = decode_f32le(&tokio::fs::read(&raw_path).await?);
    let _ = tokio::fs::remove_file(&raw_path).await;

    if samples.is_empty() {
        return Err(MediaError::NoAudioData);
    }

    debug!(
        samples = samples.len(),
        duration_secs = samples.len() as f64 / f64::from(TARGET_SAMPLE_RATE),
        "Audio extraction complete"
    );

    Ok(AudioTrack {
        samples,
        sample_rate: TARGET_SAMPLE_RATE,
        wav_path,
    })
}

/// Decode raw little-endian f32 PCM bytes into samples. Trailing bytes that
/// do not form a full sample are ignored.
pub fn decode_f32le(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_f32le() {
        let mut bytes = Vec::new();
        for value in [0.0f32, 0.5, -1.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let samples = decode_f32le(&bytes);
        assert_eq!(samples, vec![0.0, 0.5, -1.0]);
    }

    #[test]
    fn test_decode_f32le_ignores_trailing_bytes() {
        let mut bytes = 1.0f32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0x01, 0x02]);
        let samples = decode_f32le(&bytes);
        assert_eq!(samples, vec![1.0]);
    }

    #[test]
    fn test_decode_f32le_empty() {
        assert!(decode_f32le(&[]).is_empty());
    }

    #[test]
    fn test_audio_track_duration() {
        let track = AudioTrack {
            samples: vec![0.0; 32_000],
            sample_rate: TARGET_SAMPLE_RATE,
            wav_path: PathBuf::from("/tmp/audio.wav"),
        };
        assert!((track.duration_secs() - 2.0).abs() < 1e-9);
    }
}
