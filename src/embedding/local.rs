//! Local deterministic embedding provider.
//!
//! Needs no model files or network. Each character adds a position weight to the
//! bucket picked by its code point, then the vector is L2-normalized. Coarse, but a
//! pure function of the input: the same text always yields bit-identical output.

use super::{EmbeddingError, EmbeddingProvider, LOCAL_EMBEDDING_DIM};

#[derive(Debug, Clone, Default)]
pub struct LocalEmbeddingProvider;

impl LocalEmbeddingProvider {
    pub fn new() -> Self {
        Self
    }
}

impl EmbeddingProvider for LocalEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(hash_embed(text, LOCAL_EMBEDDING_DIM))
    }

    fn dimensions(&self) -> usize {
        LOCAL_EMBEDDING_DIM
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Character-position weighted accumulation into `dim` buckets.
///
/// Weights use the byte offset of each character over the byte length of the text,
/// so later characters weigh more.
fn hash_embed(text: &str, dim: usize) -> Vec<f32> {
    let mut embedding = vec![0.0f32; dim];
    let len = text.len() as f32;

    for (offset, ch) in text.char_indices() {
        let bucket = ch as usize % dim;
        embedding[bucket] += (offset + 1) as f32 / len;
    }

    l2_normalize(&mut embedding);
    embedding
}

/// L2-normalize in place. A zero vector is left as is.
fn l2_normalize(v: &mut [f32]) {
    let sum: f32 = v.iter().map(|x| x * x).sum();
    if sum > 0.0 {
        let inv_norm = 1.0 / sum.sqrt();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}
