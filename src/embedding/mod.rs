//! Text-to-vector embedding providers.
//!
//! Provides the [`EmbeddingProvider`] trait, a deterministic local implementation
//! ([`local::LocalEmbeddingProvider`], 384 dimensions) and a remote OpenAI-compatible
//! one ([`remote::RemoteEmbeddingProvider`]). The provider is chosen once via
//! [`create_provider`] from configuration.

pub mod local;
pub mod remote;

use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;

use crate::config::EmbeddingConfig;

/// Number of dimensions produced by the local provider.
pub const LOCAL_EMBEDDING_DIM: usize = 384;

/// Why a provider could not produce a vector.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("API key not set: export {var}")]
    MissingApiKey { var: String },

    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),

    #[error("embedding service returned an empty vector")]
    EmptyEmbedding,
}

/// Trait for embedding text into vectors.
///
/// All vectors from one provider have [`EmbeddingProvider::dimensions`] entries.
/// Calls are synchronous and may block on network I/O.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed a batch of text strings. Implementations may override for batched requests.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Return the number of dimensions this provider produces.
    fn dimensions(&self) -> usize;

    /// Short identifier for logs.
    fn name(&self) -> &str;
}

/// Create an embedding provider from config.
///
/// `"auto"` prefers the remote provider and falls back to the local one when no API
/// key is available. The choice is made here, once.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider.as_str() {
        "local" => Arc::new(local::LocalEmbeddingProvider::new()),
        "openai" => Arc::new(remote::RemoteEmbeddingProvider::from_config(config)?),
        "auto" => match remote::RemoteEmbeddingProvider::from_config(config) {
            Ok(remote) => Arc::new(remote),
            Err(e) => {
                tracing::warn!(error = %e, "remote embeddings unavailable, using local fallback");
                Arc::new(local::LocalEmbeddingProvider::new())
            }
        },
        other => anyhow::bail!(
            "unknown embedding provider: {other}. Supported: auto, openai, local"
        ),
    };

    tracing::info!(
        provider = provider.name(),
        dimensions = provider.dimensions(),
        "embedding provider ready"
    );
    Ok(provider)
}
