//! Transcript types produced by the transcription collaborator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single timed span of transcript text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Segment start in seconds
    pub start_secs: f64,

    /// Segment end in seconds
    pub end_secs: f64,

    /// Transcribed text for this span
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_secs: f64, end_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            end_secs,
            text: text.into(),
        }
    }

    /// Whether the segment intersects the given window. Inclusive at both
    /// edges, so a segment touching a window boundary counts.
    pub fn overlaps(&self, start_secs: f64, end_secs: f64) -> bool {
        self.end_secs >= start_secs && self.start_secs <= end_secs
    }
}

/// Outcome of asking the transcription collaborator for a transcript.
///
/// Transcription is best-effort: a missing engine, a request failure, or a
/// timeout all surface as `Unavailable` rather than failing the job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Transcription {
    /// Transcript segments in time order
    Segments { segments: Vec<TranscriptSegment> },
    /// No transcript; keyword scoring is skipped for the job
    Unavailable { reason: String },
}

impl Transcription {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Segments when present, regardless of whether any are non-empty.
    pub fn segments(&self) -> Option<&[TranscriptSegment]> {
        match self {
            Transcription::Segments { segments } => Some(segments),
            Transcription::Unavailable { .. } => None,
        }
    }

    /// True when keyword scoring has transcript text to work with.
    pub fn is_usable(&self) -> bool {
        matches!(self, Transcription::Segments { segments } if !segments.is_empty())
    }
}
