//! Query-time types: retrieval results, prompts and answers

use serde::{Deserialize, Serialize};

use crate::types::Chunk;

/// A retrieved chunk with its similarity to the query.
///
/// Scores are cosine similarities; higher is more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Similarity score
    pub score: f32,
}

/// Assembled prompt input for one query. Transient; discarded after
/// generation.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// Concatenation of the retrieved chunk texts
    pub context_text: String,
    /// The user's question
    pub question: String,
}

/// A generated answer together with the chunks that grounded it.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Generated answer text
    pub text: String,
    /// Chunks used as context, in retrieval order
    pub sources: Vec<ScoredChunk>,
}
