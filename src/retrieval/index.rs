//! In-memory vector index with exact cosine-similarity search
//!
//! Built once from the embedded corpus and read-only afterwards. Search is
//! an exact linear scan, which preserves the exact-ranking contract and is
//! plenty at session-local corpus scale.

use crate::error::{Error, Result};
use crate::types::{Chunk, ScoredChunk};

/// One embedded chunk
#[derive(Debug, Clone)]
struct IndexEntry {
    vector: Vec<f32>,
    chunk: Chunk,
}

/// Read-only nearest-neighbor index over (vector, chunk) pairs
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from embedded chunks, preserving insertion order.
    ///
    /// All vectors must share one dimension; a mismatch is a configuration
    /// error, not a silent drop.
    pub fn build(entries: Vec<(Vec<f32>, Chunk)>) -> Result<Self> {
        let dimensions = entries.first().map(|(v, _)| v.len()).unwrap_or(0);

        let entries = entries
            .into_iter()
            .map(|(vector, chunk)| {
                if vector.len() != dimensions {
                    return Err(Error::config(format!(
                        "embedding dimension mismatch: expected {}, got {} (chunk from '{}')",
                        dimensions,
                        vector.len(),
                        chunk.source
                    )));
                }
                Ok(IndexEntry { vector, chunk })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Return the `k` most similar chunks, highest similarity first.
    ///
    /// `k` is clamped to the index size; an empty index yields an empty
    /// result. Ties keep insertion order (stable sort).
    pub fn query(&self, vector: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(vector, &entry.vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k.min(self.entries.len()));
        scored
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimensions the index was built with
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Cosine similarity; zero vectors score 0.0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
