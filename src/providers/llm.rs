//! Generation provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Recognized generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Upper bound on produced token count
    pub max_new_tokens: u32,
    /// Sampling randomness in [0, 1]
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.3,
        }
    }
}

/// Trait for the opaque, synchronous-per-call text generation service.
///
/// Initialized once and reused across all queries in a session.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the assembled prompt
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Underlying model name
    fn model(&self) -> &str;
}
