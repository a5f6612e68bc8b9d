//! Project-aware re-ranking of search results.
//!
//! Runs after the pure similarity ranking: results from the ambient project get a
//! bounded multiplier, then the list is re-sorted. A boosted score can always be
//! traced back as `score / PROJECT_BOOST` unless it was clamped.

use crate::memory::search::sort_by_similarity;
use crate::memory::types::SearchResult;

/// Multiplier applied to results whose project matches the ambient project.
pub const PROJECT_BOOST: f64 = 1.2;

/// Upper bound for any boosted similarity.
pub const MAX_SIMILARITY: f64 = 1.0;

/// Boost results belonging to `project` and re-sort.
///
/// An empty `project` leaves the list untouched, including its order. Returns the
/// number of boosted results.
pub fn apply_project_boost(results: &mut [SearchResult], project: &str) -> usize {
    if project.is_empty() {
        return 0;
    }

    let mut boosted = 0;
    for result in results.iter_mut().filter(|r| r.note.in_project(project)) {
        result.similarity = boost(result.similarity);
        boosted += 1;
    }

    sort_by_similarity(results);
    tracing::debug!(project, boosted, "applied project boost");
    boosted
}

// The lower clamp only matters for negative scores, which the multiplier would
// otherwise push below -1.
fn boost(similarity: f64) -> f64 {
    (similarity * PROJECT_BOOST).clamp(-MAX_SIMILARITY, MAX_SIMILARITY)
}
