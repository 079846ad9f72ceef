//! Weighted combination and top-K selection.

use std::cmp::Ordering;

use tracing::debug;

use clipscout_models::{Clip, ScoreWeights};

use crate::candidates::Candidate;
use crate::explain;

/// Fill combined scores from the per-signal scores. `weights` must already
/// be normalized for the active signal set.
pub fn combine_scores(candidates: &mut [Candidate], weights: &ScoreWeights) {
    for candidate in candidates.iter_mut() {
        candidate.combined_score = weights.energy * candidate.energy_score
            + weights.speech * candidate.speech_density_score
            + weights.keyword * candidate.keyword_score;
    }
}

/// Total ranking order: highest combined score first, ties to the earlier
/// start, then to the shorter window. `total_cmp` keeps this a total order
/// even for pathological float inputs.
fn ranking_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.combined_score
        .total_cmp(&a.combined_score)
        .then_with(|| a.start_secs.total_cmp(&b.start_secs))
        .then_with(|| a.duration_secs().total_cmp(&b.duration_secs()))
}

/// Rank candidates and keep the top `k` as explained clips.
///
/// Overlapping windows rank independently; two adjacent high-energy windows
/// can both surface. Returns fewer than `k` clips only when fewer candidates
/// exist.
pub fn select_top_clips(
    mut candidates: Vec<Candidate>,
    weights: &ScoreWeights,
    k: usize,
    keywords_active: bool,
) -> Vec<Clip> {
    combine_scores(&mut candidates, weights);
    candidates.sort_by(ranking_order);
    candidates.truncate(k);

    debug!(clips = candidates.len(), "Ranked top candidates");

    candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| Clip {
            rank: i as u32 + 1,
            start_secs: candidate.start_secs,
            end_secs: candidate.end_secs,
            score: candidate.combined_score,
            energy_score: candidate.energy_score,
            speech_density_score: candidate.speech_density_score,
            keyword_score: candidate.keyword_score,
            reason: explain::build_reason(&candidate, weights, keywords_active),
        })
        .collect()
}
