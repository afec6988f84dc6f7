//! Document ingestion: corpus loading and chunking

mod chunker;
mod loader;

pub use chunker::TextChunker;
pub use loader::{DocumentLoader, LoadOutcome};
