//! Transcript keyword extraction and per-window relevance scoring.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use clipscout_models::TranscriptSegment;

use crate::candidates::Candidate;

/// Common English words excluded from the keyword table.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "this",
    "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who",
    "when", "where", "why", "how", "all", "each", "every", "both", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just",
];

/// Lowercase alphanumeric tokens of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() >= 2)
        .map(str::to_string)
        .collect()
}

/// Ranked keyword table derived from a whole transcript.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    entries: Vec<(String, u64)>,
}

impl KeywordTable {
    /// Build the table from transcript segments: token frequencies with
    /// stopwords removed, capped at `keyword_count` by count. Ties anywhere,
    /// including at the cap boundary, break toward the token seen earliest in
    /// the transcript, so the table is deterministic.
    pub fn from_segments(segments: &[TranscriptSegment], keyword_count: usize) -> Self {
        let mut counts: HashMap<String, (u64, usize)> = HashMap::new();
        let mut position = 0usize;

        for segment in segments {
            for token in tokenize(&segment.text) {
                if !STOPWORDS.contains(&token.as_str()) {
                    let entry = counts.entry(token).or_insert((0, position));
                    entry.0 += 1;
                }
                position += 1;
            }
        }

        let mut ranked: Vec<(String, u64, usize)> = counts
            .into_iter()
            .map(|(word, (count, first_seen))| (word, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(keyword_count);

        debug!(keywords = ranked.len(), "Keyword table built");

        Self {
            entries: ranked
                .into_iter()
                .map(|(word, count, _)| (word, count))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Table words in rank order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }
}

/// Score one candidate window: the fraction of table words present in the
/// transcript text overlapping the window. A word counts once no matter how
/// often it repeats.
pub fn keyword_score(
    table: &KeywordTable,
    segments: &[TranscriptSegment],
    candidate: &Candidate,
) -> f64 {
    if table.is_empty() {
        return 0.0;
    }

    let mut present: HashSet<String> = HashSet::new();
    for segment in segments {
        if segment.overlaps(candidate.start_secs, candidate.end_secs) {
            present.extend(tokenize(&segment.text));
        }
    }

    if present.is_empty() {
        return 0.0;
    }

    let hits = table.words().filter(|word| present.contains(*word)).count();
    (hits as f64 / table.len() as f64).clamp(0.0, 1.0)
}

/// Fill keyword scores for every candidate.
pub fn score_candidates(
    candidates: &mut [Candidate],
    table: &KeywordTable,
    segments: &[TranscriptSegment],
) {
    for candidate in candidates.iter_mut() {
        candidate.keyword_score = keyword_score(table, segments, candidate);
    }
}
