#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use brain::embedding::{EmbeddingError, EmbeddingProvider};
use brain::storage::NoteFile;
use brain::{Brain, Note};
use tempfile::TempDir;

/// Embedding provider with fixed vectors per text, for exact ranking tests.
///
/// Unknown texts embed to a spike at a position derived from their length, texts
/// in `failing` always error.
#[derive(Default)]
pub struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
    dim: usize,
}

impl FixedEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Self::default()
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dim, "fixture vector has wrong dimension");
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }
}

impl EmbeddingProvider for FixedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.failing.contains(text) {
            return Err(EmbeddingError::MalformedResponse(format!("refusing {text:?}")));
        }
        if let Some(v) = self.vectors.get(text) {
            return Ok(v.clone());
        }
        let mut v = vec![0.0; self.dim];
        v[text.len() % self.dim] = 1.0;
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Wraps a [`FixedEmbedder`] and blocks the first embedding of `pause_on` until the
/// test releases it, so another operation can be run while a call is in flight.
pub struct PausingEmbedder {
    inner: FixedEmbedder,
    pause_on: String,
    entered: Mutex<Option<Sender<()>>>,
    release: Mutex<Option<Receiver<()>>>,
}

impl PausingEmbedder {
    /// Returns the embedder, a receiver signalled when the pause starts, and a
    /// sender that ends it.
    pub fn new(inner: FixedEmbedder, pause_on: &str) -> (Self, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let embedder = Self {
            inner,
            pause_on: pause_on.to_string(),
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        (embedder, entered_rx, release_tx)
    }
}

impl EmbeddingProvider for PausingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text == self.pause_on {
            let entered = self.entered.lock().unwrap().take();
            let release = self.release.lock().unwrap().take();
            if let (Some(entered), Some(release)) = (entered, release) {
                entered.send(()).unwrap();
                release.recv().unwrap();
            }
        }
        self.inner.embed(text)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "pausing"
    }
}

/// A brain over `embedder` with its notes file in a fresh temp dir.
pub fn test_brain(embedder: impl EmbeddingProvider + 'static) -> (TempDir, Brain) {
    let tmp = TempDir::new().unwrap();
    let brain = Brain::new(Arc::new(embedder), NoteFile::new(notes_path(&tmp)));
    (tmp, brain)
}

pub fn notes_path(tmp: &TempDir) -> std::path::PathBuf {
    tmp.path().join("notes.json")
}

/// A note with a known id, tags, project and embedding.
pub fn note(id: &str, tags: &[&str], project: Option<&str>, embedding: Vec<f32>) -> Note {
    let mut n = Note::new(
        format!("note {id}"),
        tags.iter().map(|t| t.to_string()).collect(),
        project.map(String::from),
    )
    .with_embedding(embedding);
    n.id = id.to_string();
    n
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
