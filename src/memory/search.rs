//! Exact similarity search: tag filter → cosine score → stable rank → truncate.
//!
//! Everything here is total: mismatched or zero-length vectors score `0.0`, an empty
//! candidate set yields an empty list.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::memory::types::{Note, SearchResult};

/// Which notes are eligible before scoring.
#[derive(Debug, Clone, Copy, Default)]
pub enum TagFilter<'a> {
    /// No filtering.
    #[default]
    Any,
    /// Keep notes sharing at least one tag with the set.
    AnyOf(&'a [String]),
}

impl<'a> TagFilter<'a> {
    /// An empty tag list means no filter at all.
    pub fn from_tags(tags: &'a [String]) -> Self {
        if tags.is_empty() {
            Self::Any
        } else {
            Self::AnyOf(tags)
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::Any => true,
            Self::AnyOf(tags) => has_any_tag(&note.tags, tags),
        }
    }
}

/// Cosine similarity of two vectors, accumulated in `f64`.
///
/// Returns exactly `0.0` when the lengths differ or either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// `true` iff the two tag sets intersect. Case-sensitive, exact match only.
/// An empty filter matches nothing.
pub fn has_any_tag(note_tags: &[String], filter_tags: &[String]) -> bool {
    filter_tags.iter().any(|f| note_tags.iter().any(|t| t == f))
}

/// Score and rank `notes` against `query`, keeping at most `limit` results.
///
/// Ties keep enumeration order. `limit` is honored literally: `0` returns nothing.
pub fn rank(
    notes: &[Arc<Note>],
    query: &[f32],
    limit: usize,
    filter: TagFilter<'_>,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = notes
        .iter()
        .filter(|note| filter.matches(note))
        .map(|note| SearchResult::new(Arc::clone(note), cosine_similarity(query, note.embedding())))
        .collect();

    tracing::debug!(candidates = results.len(), limit, "ranking candidates");

    sort_by_similarity(&mut results);
    results.truncate(limit);
    results
}

/// Sort descending by similarity. `sort_by` is stable, so equal scores keep their order.
pub fn sort_by_similarity(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
}
