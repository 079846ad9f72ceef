//! Frame extraction: fixed-duration frames with RMS energy.

use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// A fixed-duration analysis frame with its energy signals.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Position in the frame sequence
    pub index: usize,
    /// Frame start in seconds
    pub start_secs: f64,
    /// Frame end in seconds
    pub end_secs: f64,
    /// RMS energy of the frame samples
    pub raw_energy: f64,
    /// Energy scaled by the loudest frame, in [0, 1]
    pub normalized_energy: f64,
    /// Speech activity in [0, 1], filled by the activity pass
    pub activity_score: f64,
}

/// Split mono PCM samples into consecutive non-overlapping frames and compute
/// per-frame RMS energy, normalized against the loudest frame of the track.
///
/// A trailing partial frame is dropped when shorter than half a frame and
/// zero-padded to full length otherwise. Padded zeros stay in the RMS
/// denominator, so a padded tail reads quieter than its samples alone.
/// Silent audio yields raw and normalized energies of exactly 0 everywhere.
pub fn extract_frames(
    samples: &[f32],
    sample_rate: u32,
    frame_duration_secs: f64,
) -> EngineResult<Vec<AudioFrame>> {
    let samples_per_frame = (frame_duration_secs * sample_rate as f64) as usize;
    if samples_per_frame == 0 {
        return Err(EngineError::InvalidSampleRate(sample_rate));
    }
    if samples.len() < samples_per_frame {
        return Err(EngineError::AudioTooShort {
            samples: samples.len(),
            needed: samples_per_frame,
        });
    }

    let mut frames = Vec::with_capacity(samples.len() / samples_per_frame + 1);

    for (index, chunk) in samples.chunks(samples_per_frame).enumerate() {
        // Drop a tail shorter than half a frame
        if chunk.len() * 2 < samples_per_frame {
            break;
        }

        let sum_squares: f64 = chunk
            .iter()
            .map(|&sample| f64::from(sample) * f64::from(sample))
            .sum();
        let raw_energy = (sum_squares / samples_per_frame as f64).sqrt();

        let start_secs = index as f64 * frame_duration_secs;
        frames.push(AudioFrame {
            index,
            start_secs,
            end_secs: start_secs + frame_duration_secs,
            raw_energy,
            normalized_energy: 0.0,
            activity_score: 0.0,
        });
    }

    let max_energy = frames.iter().map(|f| f.raw_energy).fold(0.0f64, f64::max);
    if max_energy > 0.0 {
        for frame in &mut frames {
            frame.normalized_energy = frame.raw_energy / max_energy;
        }
    }

    debug!(
        frames = frames.len(),
        samples = samples.len(),
        max_energy,
        "Frame extraction complete"
    );

    Ok(frames)
}
