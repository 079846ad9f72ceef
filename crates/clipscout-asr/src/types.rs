//! Response types for the transcription endpoint.

use clipscout_models::TranscriptSegment;
use serde::Deserialize;

/// `verbose_json` response body. Only the segment list is consumed.
#[derive(Debug, Deserialize)]
pub struct VerboseTranscription {
    #[serde(default)]
    pub segments: Vec<VerboseSegment>,
}

#[derive(Debug, Deserialize)]
pub struct VerboseSegment {
    #[serde(default)]
    pub start: f64,
    pub end: Option<f64>,
    #[serde(default)]
    pub text: String,
}

impl VerboseTranscription {
    /// Convert into domain segments, trimming text and dropping segments
    /// with no words. A missing end time falls back to the start time.
    pub fn into_segments(self) -> Vec<TranscriptSegment> {
        self.segments
            .into_iter()
            .filter_map(|seg| {
                let text = seg.text.trim();
                if text.is_empty() {
                    return None;
                }
                let end = seg.end.unwrap_or(seg.start);
                Some(TranscriptSegment::new(seg.start, end, text))
            })
            .collect()
    }
}
