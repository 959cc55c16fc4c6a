//! Score-based relevance filtering of query matches.

use crate::types::ScoredMatch;

/// Drop every match scoring below `min_score`.
///
/// Surviving matches keep the order the index returned them in. A score
/// equal to `min_score` is kept.
pub fn retain_relevant(matches: Vec<ScoredMatch>, min_score: f64) -> Vec<ScoredMatch> {
    matches
        .into_iter()
        .filter(|m| m.score >= min_score)
        .collect()
}
