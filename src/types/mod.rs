//! Core data types shared across the pipeline

pub mod document;
pub mod response;

pub use document::{Chunk, Document};
pub use response::{Answer, PromptContext, ScoredChunk};
