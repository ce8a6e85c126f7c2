//! Ingestion utilities: identity canonicalization, cache partitioning, and
//! the batch pipeline that ties loading, splitting, and indexing together.
//!
//! * [`identity`] — one canonicalization rule applied once, at the entry
//!   point, so cache keys and citation labels can never disagree.
//! * [`cache`] — partitions a source batch into already-indexed vs. new,
//!   failing open when the index cannot answer.
//! * [`pipeline`] — per-source load isolation and the add-or-fail contract
//!   against the vector index.

pub mod cache;
pub mod identity;
pub mod pipeline;

pub use cache::filter_uncached;
pub use identity::canonical_identity;
pub use pipeline::{FailedSource, IngestOutcome, ingest_sources};
