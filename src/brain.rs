//! Note lifecycle: add, search, list, contextual search and reload.
//!
//! [`Brain`] ties the embedding provider, the [`VectorStore`] and the [`NoteFile`]
//! together. It is constructed once per process and passed to whatever needs it.
//!
//! Writes persist before they become visible: `add` saves the would-be collection
//! first and only inserts into the store once the file is written. A failed save
//! leaves both disk and memory untouched.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::config::BrainConfig;
use crate::context::WorkContext;
use crate::embedding::{self, EmbeddingError, EmbeddingProvider};
use crate::memory::boost::apply_project_boost;
use crate::memory::search::{has_any_tag, TagFilter};
use crate::memory::store::VectorStore;
use crate::memory::types::{Note, SearchResult};
use crate::storage::{NoteFile, PersistenceError};

/// Candidate pool for contextual search, as a multiple of the requested limit, so
/// project notes just below the cut can still be boosted into it.
const CONTEXT_CANDIDATE_FACTOR: usize = 3;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("text must not be empty")]
    EmptyText,

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Outcome of a full reload from the notes file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReloadReport {
    pub loaded: usize,
    /// Notes whose embedding could not be recomputed. They stay on disk but are not
    /// searchable until the next successful reload.
    pub skipped: usize,
}

pub struct Brain {
    embedder: Arc<dyn EmbeddingProvider>,
    store: VectorStore,
    file: NoteFile,
    // Serializes reload and the snapshot → save → insert of `add`, so no writer can
    // overwrite another's file write.
    write_gate: Mutex<()>,
}

impl Brain {
    /// Open the brain described by `config`: create the data dir, pick the embedding
    /// provider and load every saved note.
    pub fn open(config: &BrainConfig) -> anyhow::Result<Self> {
        let data_dir = config.resolved_data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            anyhow::anyhow!("failed to create data dir {}: {e}", data_dir.display())
        })?;

        let embedder = embedding::create_provider(&config.embedding)?;
        let brain = Self::new(embedder, NoteFile::new(config.notes_path()));
        brain.reload()?;
        Ok(brain)
    }

    /// Build an empty brain from explicit parts. Call [`Brain::reload`] to load the file.
    ///
    /// Until then the store is empty, and an `add` overwrites the notes file with just
    /// the new note.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, file: NoteFile) -> Self {
        Self {
            embedder,
            store: VectorStore::new(),
            file,
            write_gate: Mutex::new(()),
        }
    }

    /// Replace the in-memory collection with the notes file, recomputing embeddings.
    ///
    /// Notes whose embedding fails are logged and left out of the searchable set.
    /// Holds the write gate throughout, so an `add` cannot land between the read and
    /// the replace and then be overwritten by the stale snapshot.
    pub fn reload(&self) -> Result<ReloadReport, BrainError> {
        let _gate = self.write_gate.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = self.file.load()?;
        let mut notes = Vec::with_capacity(saved.len());
        let mut skipped = 0;

        for note in saved {
            if note.has_embedding() {
                notes.push(Arc::new(note));
                continue;
            }
            match self.embedder.embed(&note.content) {
                Ok(embedding) => notes.push(Arc::new(note.with_embedding(embedding))),
                Err(e) => {
                    tracing::warn!(id = %note.id, error = %e, "skipping note: embedding failed");
                    skipped += 1;
                }
            }
        }

        let report = ReloadReport {
            loaded: notes.len(),
            skipped,
        };
        self.store.replace_all(notes);
        tracing::info!(loaded = report.loaded, skipped = report.skipped, "notes loaded");
        Ok(report)
    }

    /// Embed, persist and insert a new note.
    pub fn add(
        &self,
        content: &str,
        tags: Vec<String>,
        project: Option<String>,
    ) -> Result<Arc<Note>, BrainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BrainError::EmptyText);
        }

        // Embedding happens outside any lock; it may block on the network.
        let embedding = self.embedder.embed(content)?;
        let note = Arc::new(Note::new(content, tags, project).with_embedding(embedding));

        let _gate = self.write_gate.lock().unwrap_or_else(PoisonError::into_inner);
        let mut pending = self.store.all();
        pending.push(Arc::clone(&note));
        self.file.save(&pending)?;
        self.store.insert(Arc::clone(&note));

        tracing::info!(id = %note.id, tags = note.tags.len(), "note added");
        Ok(note)
    }

    /// Semantic search. `limit == 0` means no limit; an empty `tags` slice means no
    /// tag filter.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
        tags: &[String],
    ) -> Result<Vec<SearchResult>, BrainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BrainError::EmptyText);
        }

        let embedding = self.embedder.embed(query)?;
        let limit = if limit == 0 { usize::MAX } else { limit };
        tracing::debug!(limit, tags = tags.len(), "searching notes");
        Ok(self.store.search(&embedding, limit, TagFilter::from_tags(tags)))
    }

    /// Search driven by the work context, with notes from the current project
    /// boosted. A context that yields no query text returns no results.
    pub fn contextual_search(
        &self,
        context: &WorkContext,
        limit: usize,
    ) -> Result<Vec<SearchResult>, BrainError> {
        let query = context.query_text();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = limit.saturating_mul(CONTEXT_CANDIDATE_FACTOR);
        let mut results = self.search(&query, candidates, &[])?;
        apply_project_boost(&mut results, context.project_name());
        if limit > 0 {
            results.truncate(limit);
        }
        Ok(results)
    }

    /// Every note sharing a tag with `tags` (all notes when empty), in insertion order.
    pub fn list(&self, tags: &[String]) -> Vec<Arc<Note>> {
        let mut notes = self.store.all();
        if !tags.is_empty() {
            notes.retain(|n| has_any_tag(&n.tags, tags));
        }
        notes
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
