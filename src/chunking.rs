//! Boundary-aware document splitting with exact overlap.
//!
//! Documents are cut into chunks of at most `chunk_size` characters, and
//! each chunk begins with the final `chunk_overlap` characters of its
//! predecessor. Cuts prefer the coarsest natural boundary that fits the
//! size budget: paragraph break, then line break, then sentence end, then
//! word gap, with a hard character cut as the last resort. Offsets are
//! character offsets into the originating document, so multi-byte text
//! chunks correctly.

use crate::types::{Chunk, RagError, SourceDocument};

/// Boundary hierarchy, coarsest first. A cut lands immediately after the
/// separator, so the separator stays with the preceding chunk.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Parameters for one split call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum chunk length in characters. Must be positive.
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks. Must be smaller than
    /// `chunk_size`.
    pub chunk_overlap: usize,
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Rejects settings that can never produce a valid split.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(RagError::ChunkConfig {
                chunk_size: self.chunk_size,
                chunk_overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: crate::config::DEFAULT_CHUNK_SIZE,
            chunk_overlap: crate::config::DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Splits a batch of documents into ordered, overlapping chunks.
///
/// Chunks inherit their document's metadata and are numbered per document
/// from zero; `start_offset` is the chunk's character offset into its
/// document and never decreases within one document.
///
/// An empty `documents` slice is a successful empty result. A non-empty
/// slice whose documents are all empty (or whitespace-only) is
/// [`RagError::EmptySplit`]: the caller asked for chunks and got none,
/// which is a different state than not asking at all.
pub fn split_documents(
    documents: &[SourceDocument],
    config: &ChunkConfig,
) -> Result<Vec<Chunk>, RagError> {
    config.validate()?;

    let mut chunks = Vec::new();
    for document in documents {
        split_document(document, config, &mut chunks);
    }

    if !documents.is_empty() && chunks.is_empty() {
        return Err(RagError::EmptySplit {
            documents: documents.len(),
        });
    }

    tracing::debug!(
        documents = documents.len(),
        chunks = chunks.len(),
        "split documents into chunks"
    );
    Ok(chunks)
}

fn split_document(document: &SourceDocument, config: &ChunkConfig, out: &mut Vec<Chunk>) {
    let text = document.content.as_str();
    if text.trim().is_empty() {
        tracing::debug!(source = %document.metadata.source, "skipping empty document");
        return;
    }

    // Byte offset of each character, so slicing can be done in char space.
    let char_starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    let total = char_starts.len();
    let byte_at = |pos: usize| {
        if pos == total {
            text.len()
        } else {
            char_starts[pos]
        }
    };

    let mut chunk_index = 0;
    let mut start = 0;
    loop {
        let end = if total - start <= config.chunk_size {
            total
        } else {
            let hard_end = start + config.chunk_size;
            boundary_cut(text, &char_starts, start, hard_end, config.chunk_overlap)
                .unwrap_or(hard_end)
        };

        let content = &text[byte_at(start)..byte_at(end)];
        out.push(Chunk::new(
            content,
            start,
            chunk_index,
            document.metadata.clone(),
        ));
        chunk_index += 1;

        if end == total {
            break;
        }
        start = end - config.chunk_overlap;
    }
}

/// Finds the latest natural cut in `(start + overlap, hard_end]`, trying
/// coarser separators first. Returns `None` when every boundary would stall
/// the window inside the overlap region, in which case the caller hard-cuts
/// at the character level.
fn boundary_cut(
    text: &str,
    char_starts: &[usize],
    start: usize,
    hard_end: usize,
    overlap: usize,
) -> Option<usize> {
    let total = char_starts.len();
    let byte_at = |pos: usize| {
        if pos == total {
            text.len()
        } else {
            char_starts[pos]
        }
    };
    let window = &text[byte_at(start)..byte_at(hard_end)];

    for separator in SEPARATORS {
        if let Some(found) = window.rfind(separator) {
            let end_bytes = found + separator.len();
            let end = start + window[..end_bytes].chars().count();
            if end > start + overlap {
                return Some(end);
            }
        }
    }
    None
}
