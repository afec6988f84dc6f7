//! Corpus loading from a directory of files
//!
//! One Document per recognized file. Structured (JSON) files are reduced to
//! text through an explicit, ordered field-priority list; files that cannot
//! be loaded are skipped and counted, never fatal.

use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::Document;

/// Ordered field priority for structured documents. The first key whose
/// value is a JSON string wins; records with none of these (including
/// records whose matching values are non-strings) fall back to a full
/// pretty-printed dump.
const FIELD_PRIORITY: &[&str] = &["content", "text"];

/// Extensions the loader recognizes
const RECOGNIZED_EXTENSIONS: &[&str] = &["json", "txt", "md"];

/// Result of loading a corpus directory
#[derive(Debug)]
pub struct LoadOutcome {
    /// Documents in deterministic (file-name) order
    pub documents: Vec<Document>,
    /// Number of files skipped as unsupported or unparsable
    pub skipped: usize,
}

/// Corpus directory loader
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load every recognized file under `dir` into a Document.
    ///
    /// Fails only when the directory itself cannot be walked; per-file
    /// problems are logged and counted in `LoadOutcome::skipped`.
    pub fn load_dir(dir: &Path) -> Result<LoadOutcome> {
        let mut documents = Vec::new();
        let mut skipped = 0usize;

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::config(format!("cannot read corpus directory {}: {e}", dir.display()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let filename = entry.file_name().to_string_lossy().to_string();

            match Self::load_file(path, &filename) {
                Ok(doc) => {
                    tracing::debug!(source = %filename, bytes = doc.content.len(), "loaded document");
                    documents.push(doc);
                }
                Err(e) => {
                    tracing::warn!(source = %filename, "skipping file: {e}");
                    skipped += 1;
                }
            }
        }

        tracing::info!(
            documents = documents.len(),
            skipped,
            "corpus loaded from {}",
            dir.display()
        );

        Ok(LoadOutcome { documents, skipped })
    }

    /// Load a single file into a Document
    fn load_file(path: &Path, filename: &str) -> Result<Document> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !RECOGNIZED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::load(filename, format!("unsupported extension '{extension}'")));
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::load(filename, format!("read failed: {e}")))?;

        let content = match extension.as_str() {
            "json" => Self::extract_json_text(&raw)
                .map_err(|e| Error::load(filename, format!("invalid JSON: {e}")))?,
            _ => raw,
        };

        Ok(Document::new(content, filename.to_string()))
    }

    /// Reduce a JSON record to its textual body via `FIELD_PRIORITY`,
    /// falling back to a pretty-printed dump of the whole value.
    fn extract_json_text(raw: &str) -> Result<String> {
        let value: Value = serde_json::from_str(raw)?;

        if let Value::Object(map) = &value {
            for field in FIELD_PRIORITY {
                if let Some(Value::String(s)) = map.get(*field) {
                    return Ok(s.clone());
                }
            }
        }

        Ok(serde_json::to_string_pretty(&value)?)
    }
}
