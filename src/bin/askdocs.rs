//! Interactive RAG session binary
//!
//! Run with: cargo run -- --corpus ./docs

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use askdocs::config::RagConfig;
use askdocs::providers::{EmbeddingProvider, GenerationProvider, OllamaProvider};
use askdocs::{InteractiveSession, PipelineContext, StdinSource};

/// Ask questions about a local document corpus
#[derive(Parser, Debug)]
#[command(name = "askdocs", version, about)]
struct Args {
    /// Directory holding the corpus files (.json, .txt, .md)
    #[arg(long)]
    corpus: PathBuf,

    /// Target chunk size in characters
    #[arg(long, default_value_t = 500)]
    chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[arg(long, default_value_t = 50)]
    overlap: usize,

    /// Number of chunks retrieved per question
    #[arg(long, default_value_t = 3)]
    top_k: usize,

    /// Ollama base URL
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    /// Embedding model name
    #[arg(long, default_value = "nomic-embed-text")]
    embed_model: String,

    /// Generation model name
    #[arg(long, default_value = "llama3.2:1b")]
    generate_model: String,

    /// Sampling temperature in [0, 1]
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    /// Upper bound on generated tokens per answer
    #[arg(long, default_value_t = 512)]
    max_new_tokens: u32,

    /// Print the source chunks used for each answer
    #[arg(long)]
    show_sources: bool,
}

impl Args {
    fn into_config(self) -> (RagConfig, PathBuf, bool) {
        let mut config = RagConfig::default();
        config.chunking.chunk_size = self.chunk_size;
        config.chunking.chunk_overlap = self.overlap;
        config.retrieval.top_k = self.top_k;
        config.llm.base_url = self.base_url;
        config.llm.embed_model = self.embed_model;
        config.llm.generate_model = self.generate_model;
        config.llm.temperature = self.temperature;
        config.llm.max_new_tokens = self.max_new_tokens;
        (config, self.corpus, self.show_sources)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdocs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (config, corpus_dir, show_sources) = Args::parse().into_config();
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Generation model: {}", config.llm.generate_model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Overlap: {}", config.chunking.chunk_overlap);

    let (embedder, generator) = OllamaProvider::split(&config.llm)?;

    if !embedder.health_check().await.unwrap_or(false) {
        tracing::warn!("Ollama not available at {}", config.llm.base_url);
        tracing::warn!("Please start Ollama:");
        tracing::warn!("  1. Install: brew install ollama");
        tracing::warn!("  2. Start: ollama serve");
        tracing::warn!(
            "  3. Pull models: ollama pull {} && ollama pull {}",
            config.llm.embed_model,
            config.llm.generate_model
        );
        anyhow::bail!("Ollama not running");
    }

    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);
    let generator: Arc<dyn GenerationProvider> = Arc::new(generator);

    println!("Building index from {:?}...", corpus_dir);
    let pipeline = PipelineContext::build(config, embedder, generator, &corpus_dir).await?;
    println!(
        "Ready: {} chunks indexed. Ask a question, or type 'exit' to quit.\n",
        pipeline.index_len()
    );

    let mut input = StdinSource::new();
    let mut session = InteractiveSession::new(&pipeline, show_sources);
    let reason = session.run(&mut input).await;
    tracing::info!(?reason, "session ended");

    Ok(())
}
