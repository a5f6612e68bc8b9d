//! Core note type definitions.
//!
//! Defines [`Note`] (a stored unit of text with tags, project and embedding) and
//! [`SearchResult`] (a ranked, non-owning pairing of a note and its similarity).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note, matching one entry of the persisted notes file.
///
/// Notes are immutable once inserted into the store; they are shared as `Arc<Note>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// UUID v7 (time-sortable) identifier.
    pub id: String,
    /// The full text content of the note.
    pub content: String,
    /// Free-form labels. Order is irrelevant.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Project the note was captured in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Creation time. Only used for display ordering.
    pub timestamp: DateTime<Utc>,
    /// Derived from `content`, never persisted.
    #[serde(skip)]
    embedding: Vec<f32>,
}

impl Note {
    /// Create a note with a fresh id and the current time. The embedding is empty
    /// until [`Note::with_embedding`] attaches one.
    pub fn new(content: impl Into<String>, tags: Vec<String>, project: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            content: content.into(),
            tags: normalize_tags(tags),
            project: project
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            timestamp: Utc::now(),
            embedding: Vec::new(),
        }
    }

    /// Attach the embedding computed from this note's content.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }

    /// `true` if the note belongs to `project`.
    pub fn in_project(&self, project: &str) -> bool {
        self.project.as_deref() == Some(project)
    }
}

/// A single ranked match. Holds a shared reference to a note owned by the store.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub note: Arc<Note>,
    /// Cosine similarity in `[-1.0, 1.0]`, after any boost (capped at `1.0`).
    pub similarity: f64,
}

impl SearchResult {
    pub fn new(note: Arc<Note>, similarity: f64) -> Self {
        Self { note, similarity }
    }

    /// Similarity as a percentage, for display.
    pub fn relevance_percent(&self) -> f64 {
        self.similarity * 100.0
    }
}

/// Trim tags, drop empty ones and remove duplicates while keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Sort notes most recent first. Equal timestamps keep their relative order.
pub fn sort_recent_first(notes: &mut [Arc<Note>]) {
    notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
