//! Citation-grounded retrieval utilities: cached ingestion, overlapping
//! chunking, and answer-to-source validation.
//!
//! ```text
//! Sources ──► ingestion::canonical_identity ──► ingestion::filter_uncached
//!                                                     │
//!                  (external loaders) ◄── uncached ───┘
//!                          │
//! Documents ──► chunking::split_documents ──► VectorIndex::add_chunks
//!
//! Query ──► VectorIndex::similarity_search ──► grounding::format_passages
//!                                                     │
//!                 (external LLM / agent) ◄── context ─┘
//!                          │
//! Answer ──► grounding::ensure_grounded ──► grounded answer + ValidationReport
//! ```
//!
//! The vector index, the format-specific loaders, and the generation loop
//! are external collaborators behind the traits in [`stores`]; this crate
//! owns the algorithms between them.

pub mod chunking;
pub mod config;
pub mod grounding;
pub mod ingestion;
pub mod stores;
pub mod types;

pub use chunking::{ChunkConfig, split_documents};
pub use config::Settings;
pub use grounding::{ensure_grounded, format_passages, resolve_label, validate_citations};
pub use ingestion::{IngestOutcome, canonical_identity, filter_uncached, ingest_sources};
pub use stores::{DocumentLoader, Retriever, VectorIndex};
pub use types::{
    Chunk, RagError, RetrievedPassage, SourceDocument, SourceKind, SourceMetadata,
    ValidationReport,
};
