//! Error types for the RAG pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (invalid chunking parameters, mixed dimensions)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Per-file load error (unsupported or unparsable document)
    #[error("Failed to load '{filename}': {message}")]
    Load { filename: String, message: String },

    /// Embedding model error
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Generation model error
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a per-file load error
    pub fn load(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Whether a query-phase occurrence of this error leaves the session usable.
    ///
    /// Build-phase callers ignore this and abort on any error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Embedding(_) | Self::Generation(_) | Self::Http(_)
        )
    }
}
