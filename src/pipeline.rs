//! Pipeline context: immutable-after-build handles shared by every query
//!
//! The build phase (load, chunk, embed, index) runs to completion before the
//! interactive session starts; any failure here aborts the run. Per-query
//! failures are isolated to their turn by the session.

use std::path::Path;
use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::ingestion::{DocumentLoader, TextChunker};
use crate::providers::{EmbeddingProvider, GenerationOptions, GenerationProvider};
use crate::retrieval::{Retriever, VectorIndex};
use crate::types::{Answer, ScoredChunk};

/// Shared, read-only pipeline state
pub struct PipelineContext {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn GenerationProvider>,
    index: VectorIndex,
}

impl PipelineContext {
    /// Run the build phase over the corpus directory.
    ///
    /// Embedding failures here are fatal: no index can exist without
    /// embeddings.
    pub async fn build(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
        corpus_dir: &Path,
    ) -> Result<Self> {
        config.validate()?;

        let outcome = DocumentLoader::load_dir(corpus_dir)?;
        if outcome.skipped > 0 {
            tracing::warn!(skipped = outcome.skipped, "some corpus files were skipped");
        }

        let chunker = TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap)?;
        let chunks = chunker.chunk_documents(&outcome.documents);
        tracing::info!(
            documents = outcome.documents.len(),
            chunks = chunks.len(),
            "corpus chunked"
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        let index = VectorIndex::build(vectors.into_iter().zip(chunks).collect())?;
        tracing::info!(
            entries = index.len(),
            dimensions = index.dimensions(),
            embedder = embedder.name(),
            "vector index built"
        );

        Ok(Self {
            config,
            embedder,
            generator,
            index,
        })
    }

    /// Retrieve the top-k chunks for a question
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredChunk>> {
        Retriever::new(&self.embedder, &self.index)
            .retrieve(question, self.config.retrieval.top_k)
            .await
    }

    /// Generate a grounded answer from already-retrieved chunks
    pub async fn generate(&self, question: &str, sources: &[ScoredChunk]) -> Result<String> {
        let prompt = PromptBuilder::render(&PromptBuilder::build(sources, question));
        let options = GenerationOptions {
            max_new_tokens: self.config.llm.max_new_tokens,
            temperature: self.config.llm.temperature,
        };
        self.generator.generate(&prompt, &options).await
    }

    /// Answer one question: retrieve, assemble the prompt, generate.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let sources = self.retrieve(question).await?;
        let text = self.generate(question, &sources).await?;
        Ok(Answer { text, sources })
    }

    /// Number of indexed chunks
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// The pipeline configuration
    pub fn config(&self) -> &RagConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{FailingGenerator, MockEmbedder, MockGenerator};
    use std::fs;
    use tempfile::TempDir;

    async fn build_pipeline(
        dir: &TempDir,
        generator: Arc<dyn GenerationProvider>,
    ) -> Result<PipelineContext> {
        let mut config = RagConfig::default();
        config.chunking.chunk_size = 500;
        config.chunking.chunk_overlap = 20;
        config.retrieval.top_k = 1;
        PipelineContext::build(config, Arc::new(MockEmbedder), generator, dir.path()).await
    }

    #[tokio::test]
    async fn test_round_trip_single_document() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("doc1.json"),
            r#"{"content": "Allergies are immune responses to substances."}"#,
        )
        .unwrap();

        let generator = Arc::new(MockGenerator::new());
        let pipeline = build_pipeline(&dir, generator.clone()).await.unwrap();

        // chunk_size 500 with a 46-byte document: exactly one chunk, verbatim
        assert_eq!(pipeline.index_len(), 1);

        let answer = pipeline.answer("What are allergies?").await.unwrap();
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(
            answer.sources[0].chunk.text,
            "Allergies are immune responses to substances."
        );
        assert!(!answer.text.is_empty());
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_query_over_empty_corpus_still_answers() {
        let dir = TempDir::new().unwrap();
        let pipeline = build_pipeline(&dir, Arc::new(MockGenerator::new()))
            .await
            .unwrap();

        assert_eq!(pipeline.index_len(), 0);
        let answer = pipeline.answer("anything?").await.unwrap();
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_chunking_aborts_the_build() {
        let dir = TempDir::new().unwrap();
        let mut config = RagConfig::default();
        config.chunking.chunk_size = 10;
        config.chunking.chunk_overlap = 10;

        let result = PipelineContext::build(
            config,
            Arc::new(MockEmbedder),
            Arc::new(MockGenerator::new()),
            dir.path(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generation_failure_propagates_per_query() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "some corpus text").unwrap();

        let pipeline = build_pipeline(&dir, Arc::new(FailingGenerator)).await.unwrap();
        let err = pipeline.answer("q?").await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
