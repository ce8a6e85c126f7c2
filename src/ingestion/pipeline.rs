//! Batch ingest orchestration.
//!
//! One call takes a list of user-supplied sources end to end:
//! canonicalize → cache-partition → load → split → index. Each source
//! loads independently; a load failure is recorded and the batch moves on.
//! Configuration errors from the splitter and a refused add from the index
//! are fatal and propagate.

use serde::Serialize;

use crate::chunking::{ChunkConfig, split_documents};
use crate::ingestion::cache::filter_uncached;
use crate::ingestion::identity::canonical_identity;
use crate::stores::{DocumentLoader, VectorIndex};
use crate::types::RagError;

/// A source that could not be loaded, with the reason it was skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedSource {
    pub source: String,
    pub reason: String,
}

/// What one ingest call did, per source. The serving layer is expected to
/// present `failed` distinctly from `loaded`; a partially failed batch is
/// still a successful ingest of the sources that made it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    /// Canonical identities loaded, split, and indexed by this call.
    pub loaded: Vec<String>,
    /// Canonical identities skipped because the index already held them.
    pub cached: Vec<String>,
    /// Sources that failed to load, isolated from the rest of the batch.
    pub failed: Vec<FailedSource>,
    /// Number of index entries created by this call.
    pub chunks_indexed: usize,
}

/// Ingests a batch of sources into the vector index.
///
/// Identities are canonicalized up front ([`canonical_identity`]); every
/// list in the outcome carries canonical forms. Sources already present in
/// the index are skipped. A per-source load failure lands in
/// [`IngestOutcome::failed`] and does not abort the rest of the batch.
///
/// Fatal errors: invalid chunk settings, a batch of loaded documents that
/// yields zero chunks, a similarity-index add that fails or returns no ids.
pub async fn ingest_sources<I, L>(
    index: &I,
    loader: &L,
    sources: &[String],
    config: &ChunkConfig,
) -> Result<IngestOutcome, RagError>
where
    I: VectorIndex + ?Sized,
    L: DocumentLoader + ?Sized,
{
    let canonical: Vec<String> = sources.iter().map(|s| canonical_identity(s)).collect();
    let (cached, uncached) = filter_uncached(index, &canonical).await;

    if uncached.is_empty() {
        tracing::info!(cached = cached.len(), "all sources already indexed; nothing to ingest");
        return Ok(IngestOutcome {
            cached,
            ..IngestOutcome::default()
        });
    }

    tracing::info!(
        new = uncached.len(),
        cached = cached.len(),
        "processing uncached sources"
    );

    let mut documents = Vec::new();
    let mut loaded = Vec::new();
    let mut failed = Vec::new();
    for source in &uncached {
        match loader.load(source).await {
            Ok(docs) => {
                tracing::info!(source = %source, documents = docs.len(), "loaded source");
                documents.extend(docs);
                loaded.push(source.clone());
            }
            Err(err) => {
                tracing::error!(source = %source, error = %err, "skipping source after load failure");
                failed.push(FailedSource {
                    source: source.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    if documents.is_empty() {
        tracing::warn!(failed = failed.len(), "no documents loaded from uncached sources");
        return Ok(IngestOutcome {
            loaded,
            cached,
            failed,
            chunks_indexed: 0,
        });
    }

    let chunks = split_documents(&documents, config)?;
    let chunk_count = chunks.len();
    let ids = index.add_chunks(chunks).await?;
    if ids.is_empty() {
        return Err(RagError::IndexAdd);
    }

    tracing::info!(chunks = chunk_count, entries = ids.len(), "indexed chunk batch");
    Ok(IngestOutcome {
        loaded,
        cached,
        failed,
        chunks_indexed: ids.len(),
    })
}
