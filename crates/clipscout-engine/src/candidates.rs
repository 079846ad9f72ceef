//! Sliding-window candidate generation.

use tracing::debug;

use crate::frames::AudioFrame;

/// A candidate clip window with its per-signal scores.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Window start in seconds
    pub start_secs: f64,
    /// Window end in seconds
    pub end_secs: f64,
    /// Mean normalized energy over the window
    pub energy_score: f64,
    /// Mean speech activity over the window
    pub speech_density_score: f64,
    /// Transcript keyword relevance, 0 until the keyword pass runs
    pub keyword_score: f64,
    /// Weighted combination, 0 until ranking
    pub combined_score: f64,
}

impl Candidate {
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Slide a fixed window over the frame sequence and aggregate per-window
/// signal means, in start-time order.
///
/// The window never extends past the framed duration: a final short window
/// is dropped rather than truncated, and audio shorter than one window
/// yields no candidates at all.
pub fn generate_candidates(
    frames: &[AudioFrame],
    frame_duration_secs: f64,
    window_secs: f64,
    step_secs: f64,
) -> Vec<Candidate> {
    let frames_per_window = (window_secs / frame_duration_secs).floor() as usize;
    let step_frames = ((step_secs / frame_duration_secs).floor() as usize).max(1);

    if frames_per_window == 0 || frames.len() < frames_per_window {
        debug!(
            frames = frames.len(),
            frames_per_window, "Audio shorter than one candidate window"
        );
        return Vec::new();
    }

    let mut candidates = Vec::new();
    let mut start = 0usize;
    while start + frames_per_window <= frames.len() {
        let window = &frames[start..start + frames_per_window];
        let energy =
            window.iter().map(|f| f.normalized_energy).sum::<f64>() / frames_per_window as f64;
        let activity =
            window.iter().map(|f| f.activity_score).sum::<f64>() / frames_per_window as f64;

        let start_secs = start as f64 * frame_duration_secs;
        candidates.push(Candidate {
            start_secs,
            end_secs: start_secs + frames_per_window as f64 * frame_duration_secs,
            energy_score: energy,
            speech_density_score: activity,
            keyword_score: 0.0,
            combined_score: 0.0,
        });

        start += step_frames;
    }

    debug!(
        candidates = candidates.len(),
        "Candidate generation complete"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize, normalized_energy: f64, activity_score: f64) -> AudioFrame {
        AudioFrame {
            index,
            start_secs: index as f64,
            end_secs: index as f64 + 1.0,
            raw_energy: normalized_energy,
            normalized_energy,
            activity_score,
        }
    }

    fn uniform_frames(count: usize) -> Vec<AudioFrame> {
        (0..count).map(|i| frame(i, 0.5, 0.25)).collect()
    }

    #[test]
    fn test_twenty_minutes_yields_238_windows() {
        let frames = uniform_frames(1200);
        let candidates = generate_candidates(&frames, 1.0, 15.0, 5.0);

        assert_eq!(candidates.len(), 238);
        assert_eq!(candidates[0].start_secs, 0.0);
        assert_eq!(candidates[0].end_secs, 15.0);
        assert_eq!(candidates[237].start_secs, 1185.0);
        assert_eq!(candidates[237].end_secs, 1200.0);
    }

    #[test]
    fn test_audio_shorter_than_window_yields_none() {
        let frames = uniform_frames(10);
        let candidates = generate_candidates(&frames, 1.0, 15.0, 5.0);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_exactly_one_window() {
        let frames = uniform_frames(15);
        let candidates = generate_candidates(&frames, 1.0, 15.0, 5.0);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_short_final_window_dropped() {
        // 18 frames: window at 0 fits, window at 5 would need frame 19
        let frames = uniform_frames(18);
        let candidates = generate_candidates(&frames, 1.0, 15.0, 5.0);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_window_means_cover_contained_frames_only() {
        let mut frames = uniform_frames(20);
        for f in frames.iter_mut().take(10) {
            f.normalized_energy = 1.0;
            f.activity_score = 1.0;
        }
        for f in frames.iter_mut().skip(10) {
            f.normalized_energy = 0.0;
            f.activity_score = 0.0;
        }

        let candidates = generate_candidates(&frames, 1.0, 10.0, 5.0);
        assert_eq!(candidates.len(), 3);
        assert!((candidates[0].energy_score - 1.0).abs() < 1e-12);
        assert!((candidates[1].energy_score - 0.5).abs() < 1e-12);
        assert!((candidates[2].energy_score - 0.0).abs() < 1e-12);
        assert!((candidates[1].speech_density_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_step_under_one_frame_clamps_to_one() {
        let frames = uniform_frames(6);
        let candidates = generate_candidates(&frames, 1.0, 5.0, 0.5);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].start_secs, 1.0);
    }

    #[test]
    fn test_fractional_frame_duration() {
        // 0.5 s frames, 3 s window, 1 s step over 4 s of frames
        let frames: Vec<AudioFrame> = (0..8)
            .map(|i| AudioFrame {
                index: i,
                start_secs: i as f64 * 0.5,
                end_secs: (i as f64 + 1.0) * 0.5,
                raw_energy: 0.5,
                normalized_energy: 0.5,
                activity_score: 0.0,
            })
            .collect();

        let candidates = generate_candidates(&frames, 0.5, 3.0, 1.0);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].end_secs, 3.0);
        assert_eq!(candidates[1].start_secs, 1.0);
    }
}
