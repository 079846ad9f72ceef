//! Human-readable ranking explanations.

use clipscout_models::timestamp::format_seconds;
use clipscout_models::ScoreWeights;

use crate::candidates::Candidate;

const ENERGY_REASON: &str = "sustained audio energy contributes most to this segment's score";
const SPEECH_REASON: &str = "dense speech activity contributes most to this segment's score";
const KEYWORD_REASON: &str = "transcript keyword matches contribute most to this segment's score";

/// Render the explanation for a ranked candidate.
///
/// The template is deterministic: the clip's time range, each active signal
/// as an integer percentage, and a closing sentence naming the signal with
/// the highest weighted contribution. The keyword percentage appears only
/// when the keyword pass ran for the job.
pub fn build_reason(
    candidate: &Candidate,
    weights: &ScoreWeights,
    keywords_active: bool,
) -> String {
    let signals = if keywords_active {
        format!(
            "energy {}%, speech {}%, keywords {}%",
            percent(candidate.energy_score),
            percent(candidate.speech_density_score),
            percent(candidate.keyword_score),
        )
    } else {
        format!(
            "energy {}%, speech {}%",
            percent(candidate.energy_score),
            percent(candidate.speech_density_score),
        )
    };

    format!(
        "Time: {}\u{2013}{} ({:.1}s)\nSignals: {}\nReason: {}",
        format_seconds(candidate.start_secs),
        format_seconds(candidate.end_secs),
        candidate.duration_secs(),
        signals,
        dominant_signal(candidate, weights, keywords_active),
    )
}

fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Pick the signal with the highest weighted contribution. Ties resolve in
/// a fixed order: energy, then speech, then keyword.
fn dominant_signal(
    candidate: &Candidate,
    weights: &ScoreWeights,
    keywords_active: bool,
) -> &'static str {
    let energy = weights.energy * candidate.energy_score;
    let speech = weights.speech * candidate.speech_density_score;
    let keyword = if keywords_active {
        weights.keyword * candidate.keyword_score
    } else {
        f64::NEG_INFINITY
    };

    if energy >= speech && energy >= keyword {
        ENERGY_REASON
    } else if speech >= keyword {
        SPEECH_REASON
    } else {
        KEYWORD_REASON
    }
}
