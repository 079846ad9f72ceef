//! Ranked highlight clip model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A ranked highlight clip.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Rank within the job (1 = best)
    pub rank: u32,

    /// Clip start in seconds from the start of the video
    pub start_secs: f64,

    /// Clip end in seconds
    pub end_secs: f64,

    /// Combined score in [0, 1]
    pub score: f64,

    /// Mean normalized energy over the window
    pub energy_score: f64,

    /// Mean speech activity over the window
    pub speech_density_score: f64,

    /// Transcript keyword relevance (0 when no transcript was usable)
    pub keyword_score: f64,

    /// Human-readable explanation of the ranking
    pub reason: String,
}

impl Clip {
    pub fn duration_secs(&self) -> f64 {
        (self.end_secs - self.start_secs).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_duration() {
        let clip = Clip {
            rank: 1,
            start_secs: 10.0,
            end_secs: 25.0,
            score: 0.8,
            energy_score: 0.9,
            speech_density_score: 0.7,
            keyword_score: 0.0,
            reason: String::new(),
        };
        assert_eq!(clip.duration_secs(), 15.0);
    }
}
