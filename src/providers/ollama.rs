//! Ollama-backed providers for embeddings and generation
//!
//! A single HTTP client is shared by both providers so connection pooling
//! and retry behavior are configured once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::{GenerationOptions, GenerationProvider};

/// Ollama API client with automatic retry
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: LlmConfig,
    /// Maximum retries per request
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            config: config.clone(),
        })
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::generation("unknown error")))
    }

    /// Check if the Ollama server responds
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Generate an embedding with retry
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let text = text.to_string();
        let model = self.config.embed_model.clone();
        let client = self.client.clone();

        self.retry_request(|| {
            let url = url.clone();
            let text = text.clone();
            let model = model.clone();
            let client = client.clone();

            async move {
                let request = EmbedRequest {
                    model,
                    prompt: text,
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::embedding(format!("request failed: {e}")))?;

                if !response.status().is_success() {
                    return Err(Error::embedding(format!("HTTP {}", response.status())));
                }

                let embed_response: EmbedResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::embedding(format!("malformed response: {e}")))?;

                Ok(embed_response.embedding)
            }
        })
        .await
    }

    /// Generate text for a prompt with retry
    pub async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let prompt = prompt.to_string();
        let model = self.config.generate_model.clone();
        let options = options.clone();
        let client = self.client.clone();

        tracing::debug!(model = %model, prompt_bytes = prompt.len(), "generating answer");

        self.retry_request(|| {
            let url = url.clone();
            let prompt = prompt.clone();
            let model = model.clone();
            let options = options.clone();
            let client = client.clone();

            async move {
                let request = GenerateRequest {
                    model,
                    prompt,
                    stream: false,
                    options: OllamaOptions {
                        temperature: options.temperature,
                        num_predict: options.max_new_tokens,
                    },
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::generation(format!("request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::generation(format!("HTTP {status} - {body}")));
                }

                let generate_response: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::generation(format!("malformed response: {e}")))?;

                Ok(generate_response.response)
            }
        })
        .await
    }
}

/// Ollama embedding provider
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>, dimensions: usize) -> Self {
        Self { client, dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama generation provider
pub struct OllamaGenerator {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaGenerator {
    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerator {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        self.client.generate(prompt, options).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Combined Ollama provider sharing a single client
pub struct OllamaProvider;

impl OllamaProvider {
    /// Build embedder and generator backed by one shared client
    pub fn split(config: &LlmConfig) -> Result<(OllamaEmbedder, OllamaGenerator)> {
        let client = Arc::new(OllamaClient::new(config)?);
        Ok((
            OllamaEmbedder::from_client(Arc::clone(&client), config.embed_dimensions),
            OllamaGenerator::from_client(client, config.generate_model.clone()),
        ))
    }
}
