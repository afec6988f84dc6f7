//! Query-time retrieval: embed the question, search the index

use std::sync::Arc;

use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::types::ScoredChunk;

use super::index::VectorIndex;

/// Stateless composition of embedder and index
pub struct Retriever<'a> {
    embedder: &'a Arc<dyn EmbeddingProvider>,
    index: &'a VectorIndex,
}

impl<'a> Retriever<'a> {
    /// Create a retriever over shared pipeline handles
    pub fn new(embedder: &'a Arc<dyn EmbeddingProvider>, index: &'a VectorIndex) -> Self {
        Self { embedder, index }
    }

    /// Embed `query_text` and return the top-k most similar chunks
    pub async fn retrieve(&self, query_text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query_text).await?;
        let results = self.index.query(&query_embedding, k);
        tracing::debug!(
            k,
            returned = results.len(),
            top_score = results.first().map(|r| r.score),
            "retrieval complete"
        );
        Ok(results)
    }
}
