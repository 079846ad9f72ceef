//! Left-to-right composition of the ranking passes.

use tracing::{debug, info};

use clipscout_models::{Clip, HighlightConfig, Transcription};

use crate::activity;
use crate::candidates;
use crate::error::EngineResult;
use crate::frames;
use crate::keywords::{self, KeywordTable};
use crate::scoring;

/// Rank highlight clips for a mono PCM track.
///
/// Pure and deterministic: the same samples, config, and transcription always
/// produce the same clips, in the same order, with the same explanations.
/// Audio shorter than one candidate window yields `Ok` with no clips rather
/// than an error.
pub fn rank_highlights(
    samples: &[f32],
    sample_rate: u32,
    config: &HighlightConfig,
    transcription: &Transcription,
) -> EngineResult<Vec<Clip>> {
    let frames = frames::extract_frames(samples, sample_rate, config.frame_duration_secs)?;
    let frames = activity::score_frames(frames, config.energy_threshold);

    let mut candidates = candidates::generate_candidates(
        &frames,
        config.frame_duration_secs,
        config.window_secs,
        config.step_secs,
    );

    if candidates.is_empty() {
        info!(
            frames = frames.len(),
            window_secs = config.window_secs,
            "No candidate windows, returning no clips"
        );
        return Ok(Vec::new());
    }

    // Keyword scoring needs a usable transcript and a non-empty table;
    // otherwise its weight shifts onto energy and speech.
    let segments = transcription.segments().unwrap_or(&[]);
    let table = if segments.is_empty() {
        KeywordTable::default()
    } else {
        KeywordTable::from_segments(segments, config.keyword_count)
    };
    let keywords_active = !table.is_empty();

    let weights = if keywords_active {
        keywords::score_candidates(&mut candidates, &table, segments);
        config.weights.normalized()
    } else {
        config.weights.without_keyword()
    };

    debug!(
        candidates = candidates.len(),
        keywords_active, "Scoring candidates"
    );

    Ok(scoring::select_top_clips(
        candidates,
        &weights,
        config.top_k,
        keywords_active,
    ))
}
