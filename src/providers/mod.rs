//! Injected capability boundaries for the external models

pub mod embedding;
pub mod llm;
pub mod ollama;

#[cfg(test)]
pub mod mock;

pub use embedding::EmbeddingProvider;
pub use llm::{GenerationOptions, GenerationProvider};
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaGenerator, OllamaProvider};
