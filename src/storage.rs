//! Flat-file persistence for notes.
//!
//! The whole collection is read on startup and rewritten on every save; the last
//! complete write wins. Embeddings are never written and are recomputed on load.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::memory::types::Note;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read notes file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write notes file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse notes file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A JSON array of notes at a fixed path.
#[derive(Debug, Clone)]
pub struct NoteFile {
    path: PathBuf,
}

impl NoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every saved note in file order. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Note>, PersistenceError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|source| PersistenceError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `notes`. Writes a temp file next to it and renames it
    /// into place, so readers never see a partial file.
    pub fn save(&self, notes: &[Arc<Note>]) -> Result<(), PersistenceError> {
        let records: Vec<&Note> = notes.iter().map(Arc::as_ref).collect();
        let json = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(|source| self.write_error(source))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|source| self.write_error(source))?;

        tracing::info!(path = %self.path.display(), count = notes.len(), "notes file written");
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
