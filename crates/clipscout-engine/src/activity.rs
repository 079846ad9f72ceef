//! Speech activity estimation from normalized energy.
//!
//! A deliberately cheap stand-in for voice activity detection: frames whose
//! normalized energy sits at or below a threshold count as silence, and the
//! span above the threshold rescales linearly to [0, 1].

use crate::frames::AudioFrame;

/// Map normalized energy to a speech activity score.
///
/// `threshold` must be in [0, 1); config validation enforces that before a
/// job is accepted.
pub fn activity_score(normalized_energy: f64, threshold: f64) -> f64 {
    ((normalized_energy - threshold) / (1.0 - threshold)).clamp(0.0, 1.0)
}

/// Fill activity scores for a batch of frames.
pub fn score_frames(mut frames: Vec<AudioFrame>, threshold: f64) -> Vec<AudioFrame> {
    for frame in &mut frames {
        frame.activity_score = activity_score(frame.normalized_energy, threshold);
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_silent() {
        assert_eq!(activity_score(0.0, 0.3), 0.0);
        assert_eq!(activity_score(0.2, 0.3), 0.0);
        assert_eq!(activity_score(0.3, 0.3), 0.0);
    }

    #[test]
    fn test_full_energy_is_full_activity() {
        assert!((activity_score(1.0, 0.3) - 1.0).abs() < 1e-12);
        assert!((activity_score(1.0, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_rescale_above_threshold() {
        // Midpoint of [0.3, 1.0] maps to 0.5
        assert!((activity_score(0.65, 0.3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_threshold_is_identity() {
        assert!((activity_score(0.42, 0.0) - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_score_frames_fills_activity() {
        let frames = vec![
            AudioFrame {
                index: 0,
                start_secs: 0.0,
                end_secs: 1.0,
                raw_energy: 0.1,
                normalized_energy: 0.2,
                activity_score: 0.0,
            },
            AudioFrame {
                index: 1,
                start_secs: 1.0,
                end_secs: 2.0,
                raw_energy: 0.5,
                normalized_energy: 1.0,
                activity_score: 0.0,
            },
        ];

        let scored = score_frames(frames, 0.3);
        assert_eq!(scored[0].activity_score, 0.0);
        assert!((scored[1].activity_score - 1.0).abs() < 1e-12);
    }
}
