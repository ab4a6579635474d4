//! Final ordering of scored postings

use crate::matching::scorer::ScoredPosting;
use std::cmp::Ordering;

/// Stable descending sort by match score; ties keep their prior relative
/// order. The full list is returned, nothing is cut off.
pub fn rank_postings(mut scored: Vec<ScoredPosting>) -> Vec<ScoredPosting> {
    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    scored
}
