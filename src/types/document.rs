//! Document and chunk types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A document loaded from the corpus directory.
///
/// Immutable once loaded; discarded after chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Extracted text content
    pub content: String,
    /// Additional metadata; always carries a "source" entry with the
    /// originating file name
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a new document with its source file name
    pub fn new(content: String, source: String) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), source);
        Self {
            id: Uuid::new_v4(),
            content,
            metadata,
        }
    }

    /// Originating file name
    pub fn source(&self) -> &str {
        self.metadata.get("source").map(String::as_str).unwrap_or("unknown")
    }
}

/// A bounded-length text segment derived from a single document, the unit of
/// retrieval. Chunks reference their document by id and source name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID (lookup only, no ownership)
    pub document_id: Uuid,
    /// Source file name, carried over from the document for display
    pub source: String,
    /// Text content; at most chunk_size characters
    pub text: String,
    /// Position among the chunks derived from the same document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(document: &Document, text: String, chunk_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id: document.id,
            source: document.source().to_string(),
            text,
            chunk_index,
        }
    }
}
