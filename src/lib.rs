//! A second brain: save short notes, then surface them again by meaning.
//!
//! Notes are embedded into vectors when added and kept in an in-memory store. Queries
//! are answered by exact cosine-similarity scan, optionally narrowed by tags, and
//! can be re-ranked towards the project you are currently working in.
//!
//! # Architecture
//!
//! - **Embeddings**: remote OpenAI-compatible endpoint, or a deterministic local
//!   fallback (384 dimensions) when no API key is configured
//! - **Store**: `RwLock`-guarded vector of immutable notes, snapshot on read
//! - **Search**: tag filter (any-of) → cosine similarity → stable descending sort
//! - **Context boost**: ×1.2 for notes from the current git project, capped at 1.0
//! - **Persistence**: one JSON file, fully rewritten on every add
//!
//! # Modules
//!
//! - [`brain`]: Note lifecycle orchestration (add, search, list, contextual search)
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`context`]: Work context detection from the working directory and git
//! - [`embedding`]: Embedding providers and construction-time selection
//! - [`memory`]: Retrieval core (store, similarity search, project boost)
//! - [`storage`]: Notes file load/save

pub mod brain;
pub mod config;
pub mod context;
pub mod embedding;
pub mod memory;
pub mod storage;

pub use brain::{Brain, BrainError, ReloadReport};
pub use context::WorkContext;
pub use memory::{Note, SearchResult};
