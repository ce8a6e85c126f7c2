//! Trait boundaries to the external collaborators.
//!
//! The core owns no storage, no embeddings, and no document parsing; it
//! talks to those systems through the traits below and stays agnostic of
//! the backing implementation.
//!
//! ```text
//!                  ┌──────────────────┐
//!                  │ VectorIndex trait │
//!                  │   (async, CRUD)   │
//!                  └─────────┬─────────┘
//!                            │
//!          ┌─────────────────┼─────────────────┐
//!          ▼                 ▼                 ▼
//!   sqlite/sqlite-vec     pgvector          in-memory
//!   (external crate)    (external crate)   (test double)
//! ```
//!
//! # Contract notes
//!
//! - Existence checks key on **exact equality** of the metadata identity
//!   field, never on a content hash. The cache filter builds on this.
//! - [`VectorIndex::add_chunks`] returning an empty id list is a hard
//!   failure of the add; the ingest pipeline enforces that.
//! - [`VectorIndex::similarity_search`] failure is fatal to a query: no
//!   answer can be grounded without passages.

use async_trait::async_trait;

use crate::types::{Chunk, RagError, RetrievedPassage, SourceDocument};

/// Interface to the external vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns the ids of entries whose metadata identity equals `identity`
    /// exactly. An empty list means the source is not indexed.
    async fn entries_for_identity(&self, identity: &str) -> Result<Vec<String>, RagError>;

    /// Returns up to `k` passages ranked most-similar first. Implementations
    /// must assign `rank` from the result position, 1-based, so citation
    /// numbers map onto ranks without translation.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedPassage>, RagError>;

    /// Embeds and stores a chunk batch, returning the new entry ids.
    async fn add_chunks(&self, chunks: Vec<Chunk>) -> Result<Vec<String>, RagError>;
}

/// Retrieval capability handed to the externally owned orchestration loop.
///
/// The loop that drives generation needs exactly one thing from the index:
/// ranked passages for a query string. Every [`VectorIndex`] provides it.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedPassage>, RagError>;
}

#[async_trait]
impl<T> Retriever for T
where
    T: VectorIndex + ?Sized,
{
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedPassage>, RagError> {
        self.similarity_search(query, k).await
    }
}

/// Interface to the external format-specific document loaders.
///
/// `identity` is already canonical when the ingest pipeline calls this. A
/// returned error counts against that one source only; the batch continues.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, identity: &str) -> Result<Vec<SourceDocument>, RagError>;
}
