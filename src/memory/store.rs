//! In-memory vector record store.
//!
//! [`VectorStore`] owns every [`Note`] for the process lifetime behind a single
//! `RwLock`: writers are serialized against each other and against readers, readers
//! share. Notes are handed out as `Arc<Note>` snapshots, so callers can never reach
//! the internal collection.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::memory::search::{self, TagFilter};
use crate::memory::types::{Note, SearchResult};

#[derive(Debug, Default)]
pub struct VectorStore {
    notes: RwLock<Vec<Arc<Note>>>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. No deduplication: inserting the same id twice keeps both.
    pub fn insert(&self, note: impl Into<Arc<Note>>) {
        let note = note.into();
        tracing::trace!(id = %note.id, "inserting note");
        self.write().push(note);
    }

    /// Snapshot of every stored note in insertion order.
    pub fn all(&self) -> Vec<Arc<Note>> {
        self.read().clone()
    }

    /// Discard the current collection and replace it in one write.
    pub fn replace_all(&self, notes: Vec<Arc<Note>>) {
        *self.write() = notes;
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Rank stored notes against `query`. Takes a snapshot first; the lock is not
    /// held while scoring.
    pub fn search(&self, query: &[f32], limit: usize, filter: TagFilter<'_>) -> Vec<SearchResult> {
        search::rank(&self.all(), query, limit, filter)
    }

    // Notes are immutable once inserted, so a panic while holding the lock cannot
    // leave a half-written record behind.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Note>>> {
        self.notes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Note>>> {
        self.notes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn note(id: &str, embedding: Vec<f32>) -> Note {
        let mut n = Note::new(format!("content of {id}"), vec![], None).with_embedding(embedding);
        n.id = id.to_string();
        n
    }

    #[test]
    fn insert_keeps_insertion_order() {
        let store = VectorStore::new();
        store.insert(note("a", vec![1.0]));
        store.insert(note("b", vec![1.0]));
        store.insert(note("c", vec![1.0]));

        let ids: Vec<String> = store.all().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn insert_does_not_deduplicate() {
        let store = VectorStore::new();
        store.insert(note("same", vec![1.0]));
        store.insert(note("same", vec![1.0]));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn all_returns_a_detached_copy() {
        let store = VectorStore::new();
        store.insert(note("a", vec![1.0]));

        let mut snapshot = store.all();
        snapshot.clear();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_all_swaps_collection() {
        let store = VectorStore::new();
        store.insert(note("old", vec![1.0]));
        store.replace_all(vec![Arc::new(note("x", vec![1.0])), Arc::new(note("y", vec![1.0]))]);

        let ids: Vec<String> = store.all().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn concurrent_inserts_are_all_kept() {
        let store = Arc::new(VectorStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50 {
                        store.insert(note(&format!("{t}-{i}"), vec![1.0, 0.0]));
                        let _ = store.search(&[1.0, 0.0], 5, TagFilter::Any);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }

    #[test]
    fn empty_store_searches_to_nothing() {
        let store = VectorStore::new();
        assert!(store.is_empty());
        assert!(store.search(&[1.0, 0.0], 10, TagFilter::Any).is_empty());
    }
}
