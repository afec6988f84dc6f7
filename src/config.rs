//! Configuration for the RAG pipeline

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
}

impl RagConfig {
    /// Validate the configuration before the build phase.
    ///
    /// Invalid chunking parameters are fatal at startup; nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("top_k must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(Error::config(format!(
                "temperature ({}) must be in [0, 1]",
                self.llm.temperature
            )));
        }
        Ok(())
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks retrieved per query
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub embed_dimensions: usize,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation, in [0, 1]
    pub temperature: f32,
    /// Upper bound on generated tokens per answer
    pub max_new_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            embed_dimensions: 768,
            generate_model: "llama3.2:1b".to_string(),
            temperature: 0.3,
            max_new_tokens: 512,
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}
