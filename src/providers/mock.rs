//! Deterministic in-process test doubles for the provider traits

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::{GenerationOptions, GenerationProvider};

/// Embeds text as lowercase-letter frequency counts. Deterministic and
/// cheap; texts sharing vocabulary land close under cosine similarity.
pub struct MockEmbedder;

const MOCK_DIMENSIONS: usize = 26;

fn letter_histogram(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; MOCK_DIMENSIONS];
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() {
            vector[(c as u8 - b'a') as usize] += 1.0;
        }
    }
    vector
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(letter_histogram(text))
    }

    fn dimensions(&self) -> usize {
        MOCK_DIMENSIONS
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Echoes a canned answer and counts calls
#[derive(Default)]
pub struct MockGenerator {
    calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for MockGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("mock answer ({} prompt bytes)", prompt.len()))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

/// Always fails; used to exercise query-phase error recovery
pub struct FailingGenerator;

#[async_trait]
impl GenerationProvider for FailingGenerator {
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String> {
        Err(Error::generation("model unavailable"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedding_is_deterministic() {
        let embedder = MockEmbedder;
        let a = embedder.embed("What are allergies?").await.unwrap();
        let b = embedder.embed("What are allergies?").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), embedder.dimensions());
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let embedder = MockEmbedder;
        let texts = vec!["aaa".to_string(), "bbb".to_string()];
        let vectors = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(vectors[0][0], 3.0);
        assert_eq!(vectors[1][1], 3.0);
    }
}
