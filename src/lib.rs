//! askdocs: interactive question answering over a local document corpus
//!
//! A retrieval-augmented generation pipeline: documents are loaded from a
//! directory, split into bounded overlapping chunks, embedded into a
//! session-local vector index, and an Ollama-hosted model answers questions
//! grounded in the retrieved chunks.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod session;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::PipelineContext;
pub use session::{InteractiveSession, SessionState, StdinSource, TerminationReason};
pub use types::{Answer, Chunk, Document, ScoredChunk};
