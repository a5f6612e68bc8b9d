//! Retrieval core: note types, the in-memory vector store, exact similarity search
//! and project-aware re-ranking.

pub mod boost;
pub mod search;
pub mod store;
pub mod types;

pub use boost::apply_project_boost;
pub use search::{cosine_similarity, has_any_tag, TagFilter};
pub use store::VectorStore;
pub use types::{Note, SearchResult};
