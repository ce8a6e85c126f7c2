//! Core data model and error taxonomy for the retrieval core.
//!
//! Everything that crosses a component boundary lives here: source
//! documents as the external loaders hand them over, chunks as the
//! splitter produces them, retrieved passages as the vector index returns
//! them, and the validation report the grounding engine emits.
//!
//! Metadata is a single typed record ([`SourceMetadata`]) rather than a
//! loose key/value bag, so the label derived for a passage at formatting
//! time and at citation time can never drift apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Error type for ingestion and retrieval operations.
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// Chunk settings that can never produce a valid split. Fatal to the
    /// whole split call.
    #[error("invalid chunk settings: chunk_size={chunk_size}, chunk_overlap={chunk_overlap}")]
    ChunkConfig {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    /// A non-empty document batch collapsed to zero chunks (every document
    /// was empty or whitespace-only).
    #[error("no chunks produced from {documents} document(s); documents may be empty")]
    EmptySplit { documents: usize },

    /// A single source failed to load. Isolated per source during batch
    /// ingestion; the batch continues.
    #[error("failed to load source '{source}': {reason}")]
    Load { source: String, reason: String },

    /// The vector index could not be reached or returned a malformed
    /// response. Fail-open at the existence check, fatal at search time.
    #[error("vector index unavailable: {0}")]
    Index(String),

    /// The index accepted an add call but returned no entry ids.
    #[error("vector index add returned no entry ids")]
    IndexAdd,

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RagError {
    fn from(err: std::io::Error) -> Self {
        RagError::Io(err.to_string())
    }
}

/// Format tag for a source document, as detected by the external loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Web,
    Pdf,
    Txt,
    Docx,
    #[serde(rename = "md")]
    Markdown,
}

impl SourceKind {
    /// Maps a lowercase file extension to a kind, for loader implementations
    /// that route on extension. URLs are detected by scheme, not extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            "docx" => Some(Self::Docx),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web => write!(f, "web"),
            Self::Pdf => write!(f, "pdf"),
            Self::Txt => write!(f, "txt"),
            Self::Docx => write!(f, "docx"),
            Self::Markdown => write!(f, "md"),
        }
    }
}

/// Provenance record attached to every document, chunk, and retrieved
/// passage.
///
/// `source` is the canonical identity (normalized URL or absolute path) and
/// is the sole key for cache/dedup decisions. `file_name` and `page` are
/// per-unit fields some loaders populate (a PDF page, a named upload).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub source: String,
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SourceMetadata {
    pub fn new(source: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            source: source.into(),
            kind,
            file_name: None,
            page: None,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// A loaded document: normalized text plus provenance. Produced once by the
/// external loader and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub content: String,
    pub metadata: SourceMetadata,
}

impl SourceDocument {
    pub fn new(content: impl Into<String>, metadata: SourceMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

/// A bounded slice of a source document, the unit stored in the vector
/// index.
///
/// Created only by the chunker and immutable afterwards. `start_offset` is
/// a character offset into the originating document's text and is
/// non-decreasing across the chunks of one document; `chunk_index` is the
/// per-document sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub content: String,
    pub start_offset: usize,
    pub chunk_index: usize,
    pub metadata: SourceMetadata,
}

impl Chunk {
    /// Mints a chunk with a fresh id. The metadata must carry a non-empty
    /// identity; that is the loader's contract, enforced here in debug
    /// builds.
    pub fn new(
        content: impl Into<String>,
        start_offset: usize,
        chunk_index: usize,
        metadata: SourceMetadata,
    ) -> Self {
        debug_assert!(
            !metadata.source.is_empty(),
            "chunk metadata must carry a source identity"
        );
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            start_offset,
            chunk_index,
            metadata,
        }
    }

    /// Serializes the provenance record for index backends that persist
    /// metadata as a JSON column.
    pub fn index_metadata(&self) -> serde_json::Value {
        serde_json::to_value(&self.metadata).unwrap_or(serde_json::Value::Null)
    }
}

/// A passage returned by one similarity-search call.
///
/// `rank` is 1-based, call-scoped, and never persisted; within a query the
/// citation number for this passage equals its rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub content: String,
    pub metadata: SourceMetadata,
    pub rank: usize,
}

impl RetrievedPassage {
    pub fn ranked(content: impl Into<String>, metadata: SourceMetadata, rank: usize) -> Self {
        Self {
            content: content.into(),
            metadata,
            rank,
        }
    }
}

/// Outcome of citation validation. Always returned as data, never as an
/// error: a repaired answer travels alongside an `is_valid = false` report
/// and both are a successful response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether the answer as generated (pre-repair) cited correctly.
    pub is_valid: bool,
    /// The distinct citation numbers extracted from the answer.
    pub cited: BTreeSet<usize>,
    /// One diagnostic per validation failure, in ascending citation order.
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&SourceKind::Markdown).unwrap();
        assert_eq!(json, "\"md\"");
        let back: SourceKind = serde_json::from_str("\"pdf\"").unwrap();
        assert_eq!(back, SourceKind::Pdf);
    }

    #[test]
    fn source_kind_from_extension_covers_supported_formats() {
        assert_eq!(SourceKind::from_extension("pdf"), Some(SourceKind::Pdf));
        assert_eq!(SourceKind::from_extension("md"), Some(SourceKind::Markdown));
        assert_eq!(SourceKind::from_extension("html"), None);
    }

    #[test]
    fn metadata_skips_absent_optional_fields() {
        let metadata = SourceMetadata::new("https://example.com/post", SourceKind::Web);
        let value = serde_json::to_value(&metadata).unwrap();
        assert!(value.get("file_name").is_none());
        assert!(value.get("page").is_none());
    }

    #[test]
    fn chunk_index_metadata_round_trips() {
        let metadata = SourceMetadata::new("/tmp/report.pdf", SourceKind::Pdf)
            .with_file_name("report.pdf")
            .with_page(3);
        let chunk = Chunk::new("body text", 0, 0, metadata.clone());
        let value = chunk.index_metadata();
        let back: SourceMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, metadata);
    }
}
