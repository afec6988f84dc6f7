//! Hierarchical text chunking with configurable size and overlap
//!
//! Splitting descends through paragraph, sentence, word and character
//! boundaries until every unit fits the chunk size, then packs units
//! greedily. Consecutive chunks from the same document share an overlap of
//! `overlap` characters; the overlap shrinks only when the unit opening the
//! next chunk would otherwise push it past `chunk_size`, or to land on a
//! UTF-8 character boundary.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};
use crate::types::{Chunk, Document};

/// Boundary hierarchy, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitLevel {
    Paragraph,
    Sentence,
    Word,
    Grapheme,
}

impl SplitLevel {
    fn finer(self) -> Option<SplitLevel> {
        match self {
            Self::Paragraph => Some(Self::Sentence),
            Self::Sentence => Some(Self::Word),
            Self::Word => Some(Self::Grapheme),
            Self::Grapheme => None,
        }
    }
}

/// Text chunker with configurable size and overlap
pub struct TextChunker {
    /// Maximum chunk size in bytes (a single grapheme wider than this is
    /// kept whole rather than split)
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker.
    ///
    /// Rejects `overlap >= chunk_size` and `chunk_size == 0` with a
    /// configuration error; nothing is clamped.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if overlap >= chunk_size {
            return Err(Error::config(format!(
                "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Chunk a set of documents, preserving document order and in-document
    /// chunk order. Chunks never span documents.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for doc in documents {
            for (i, text) in self.chunk_text(&doc.content).into_iter().enumerate() {
                chunks.push(Chunk::new(doc, text, i as u32));
            }
        }
        chunks
    }

    /// Split one text into bounded, overlapping chunks.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut units = Vec::new();
        self.collect_units(text, SplitLevel::Paragraph, &mut units);
        self.pack(&units)
    }

    /// Segment text at the given level, recursing to finer levels for any
    /// unit that still exceeds the chunk size. Segmentation at every level
    /// preserves concatenation, which keeps the overlap arithmetic exact.
    fn collect_units<'a>(&self, text: &'a str, level: SplitLevel, out: &mut Vec<&'a str>) {
        let segments: Vec<&str> = match level {
            SplitLevel::Paragraph => text.split_inclusive("\n\n").collect(),
            SplitLevel::Sentence => text.split_sentence_bounds().collect(),
            SplitLevel::Word => text.split_word_bounds().collect(),
            SplitLevel::Grapheme => text.graphemes(true).collect(),
        };

        for segment in segments {
            if segment.len() > self.chunk_size {
                match level.finer() {
                    Some(finer) => self.collect_units(segment, finer, out),
                    // An indivisible grapheme wider than chunk_size becomes
                    // its own chunk
                    None => out.push(segment),
                }
            } else {
                out.push(segment);
            }
        }
    }

    /// Greedily pack units into chunks, carrying the overlap tail forward.
    fn pack(&self, units: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for unit in units {
            if !current.is_empty() && current.len() + unit.len() > self.chunk_size {
                let budget = self.overlap.min(self.chunk_size.saturating_sub(unit.len()));
                let tail = overlap_tail(&current, budget).to_string();
                chunks.push(std::mem::take(&mut current));
                current = tail;
            }
            current.push_str(unit);
        }

        if !current.trim().is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

/// Trailing slice of at most `budget` bytes, adjusted forward to a UTF-8
/// character boundary.
fn overlap_tail(text: &str, budget: usize) -> &str {
    if budget == 0 {
        return "";
    }
    let mut start = text.len().saturating_sub(budget);
    while start < text.len() && !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
