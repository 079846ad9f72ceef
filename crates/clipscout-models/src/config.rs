//! Highlight ranking configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative weights for combining per-window signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreWeights {
    /// Weight of mean normalized energy
    #[serde(default = "default_energy_weight")]
    pub energy: f64,

    /// Weight of mean speech activity
    #[serde(default = "default_speech_weight")]
    pub speech: f64,

    /// Weight of transcript keyword relevance
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
}

fn default_energy_weight() -> f64 {
    0.35
}

fn default_speech_weight() -> f64 {
    0.35
}

fn default_keyword_weight() -> f64 {
    0.30
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            energy: default_energy_weight(),
            speech: default_speech_weight(),
            keyword: default_keyword_weight(),
        }
    }
}

impl ScoreWeights {
    /// Normalize all three weights to sum to 1. Assumes a validated config;
    /// a degenerate all-zero input normalizes to all zeros.
    pub fn normalized(&self) -> Self {
        let total = self.energy + self.speech + self.keyword;
        if total <= 0.0 {
            return Self {
                energy: 0.0,
                speech: 0.0,
                keyword: 0.0,
            };
        }
        Self {
            energy: self.energy / total,
            speech: self.speech / total,
            keyword: self.keyword / total,
        }
    }

    /// Drop the keyword term and renormalize energy/speech, preserving their
    /// ratio. With the default weights this yields 0.5/0.5.
    pub fn without_keyword(&self) -> Self {
        let total = self.energy + self.speech;
        if total <= 0.0 {
            return Self {
                energy: 0.0,
                speech: 0.0,
                keyword: 0.0,
            };
        }
        Self {
            energy: self.energy / total,
            speech: self.speech / total,
            keyword: 0.0,
        }
    }
}

/// Tunable parameters for highlight ranking. All fields have serde defaults
/// so clients can submit a partial (or empty) config object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightConfig {
    /// Analysis frame length in seconds
    #[serde(default = "default_frame_duration")]
    pub frame_duration_secs: f64,

    /// Normalized energy at or below this maps to zero speech activity
    #[serde(default = "default_energy_threshold")]
    pub energy_threshold: f64,

    /// Candidate window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,

    /// Stride between candidate window starts in seconds
    #[serde(default = "default_step_secs")]
    pub step_secs: f64,

    /// Number of clips to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Size of the transcript keyword table
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,

    /// Signal weights
    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_frame_duration() -> f64 {
    1.0
}

fn default_energy_threshold() -> f64 {
    0.3
}

fn default_window_secs() -> f64 {
    15.0
}

fn default_step_secs() -> f64 {
    5.0
}

fn default_top_k() -> usize {
    3
}

fn default_keyword_count() -> usize {
    20
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            frame_duration_secs: default_frame_duration(),
            energy_threshold: default_energy_threshold(),
            window_secs: default_window_secs(),
            step_secs: default_step_secs(),
            top_k: default_top_k(),
            keyword_count: default_keyword_count(),
            weights: ScoreWeights::default(),
        }
    }
}

impl HighlightConfig {
    /// Validate ranges before a job is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_duration_secs.is_finite() || self.frame_duration_secs <= 0.0 {
            return Err(ConfigError::FrameDuration(self.frame_duration_secs));
        }
        if !self.energy_threshold.is_finite() || !(0.0..1.0).contains(&self.energy_threshold) {
            return Err(ConfigError::EnergyThreshold(self.energy_threshold));
        }
        if !self.window_secs.is_finite() || self.window_secs < self.frame_duration_secs {
            return Err(ConfigError::WindowLength {
                window_secs: self.window_secs,
                frame_duration_secs: self.frame_duration_secs,
            });
        }
        if !self.step_secs.is_finite() || self.step_secs <= 0.0 {
            return Err(ConfigError::Step(self.step_secs));
        }
        if self.top_k == 0 {
            return Err(ConfigError::TopK);
        }
        if self.keyword_count == 0 {
            return Err(ConfigError::KeywordCount);
        }
        for (name, value) in [
            ("energy", self.weights.energy),
            ("speech", self.weights.speech),
            ("keyword", self.weights.keyword),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Weight { name, value });
            }
        }
        if self.weights.energy + self.weights.speech <= 0.0 {
            return Err(ConfigError::DegenerateWeights);
        }
        Ok(())
    }
}

/// Rejected highlight configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("frame_duration_secs must be positive, got {0}")]
    FrameDuration(f64),

    #[error("energy_threshold must be in [0, 1), got {0}")]
    EnergyThreshold(f64),

    #[error("window_secs ({window_secs}) must be at least frame_duration_secs ({frame_duration_secs})")]
    WindowLength {
        window_secs: f64,
        frame_duration_secs: f64,
    },

    #[error("step_secs must be positive, got {0}")]
    Step(f64),

    #[error("top_k must be at least 1")]
    TopK,

    #[error("keyword_count must be at least 1")]
    KeywordCount,

    #[error("{name} weight must be a non-negative finite number, got {value}")]
    Weight { name: &'static str, value: f64 },

    #[error("energy and speech weights cannot both be zero")]
    DegenerateWeights,
}
