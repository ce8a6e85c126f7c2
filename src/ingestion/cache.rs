//! Cache partitioning for source batches.
//!
//! A source is "cached" when the index already holds at least one entry
//! whose identity metadata equals the source string exactly. Identity is
//! the sole cache key: content changes behind an unchanged identity are
//! invisible here. See DESIGN.md for the decision record.

use crate::stores::VectorIndex;

/// Partitions `sources` into `(cached, uncached)`, both preserving the
/// input order.
///
/// Duplicates in the input are kept and resolved independently; this
/// function never dedups. An existence-check failure classifies that source
/// as uncached (fail-open) and logs a diagnostic; this function never
/// returns an error to its caller.
///
/// With no intervening ingestion, two calls over the same batch produce
/// identical partitions.
pub async fn filter_uncached<I>(index: &I, sources: &[String]) -> (Vec<String>, Vec<String>)
where
    I: VectorIndex + ?Sized,
{
    let mut cached = Vec::new();
    let mut uncached = Vec::new();

    for source in sources {
        match index.entries_for_identity(source).await {
            Ok(ids) if !ids.is_empty() => {
                tracing::debug!(source = %source, entries = ids.len(), "source already indexed");
                cached.push(source.clone());
            }
            Ok(_) => uncached.push(source.clone()),
            Err(err) => {
                tracing::warn!(
                    source = %source,
                    error = %err,
                    "existence check failed; treating source as uncached"
                );
                uncached.push(source.clone());
            }
        }
    }

    (cached, uncached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, RagError, RetrievedPassage};
    use async_trait::async_trait;

    /// Index double: a fixed set of known identities, plus one identity
    /// that always errors.
    struct FixedIndex {
        known: Vec<String>,
        failing: Option<String>,
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        async fn entries_for_identity(&self, identity: &str) -> Result<Vec<String>, RagError> {
            if self.failing.as_deref() == Some(identity) {
                return Err(RagError::Index("connection refused".into()));
            }
            if self.known.iter().any(|k| k == identity) {
                Ok(vec!["entry-1".into()])
            } else {
                Ok(Vec::new())
            }
        }

        async fn similarity_search(
            &self,
            _query: &str,
            _k: usize,
        ) -> Result<Vec<RetrievedPassage>, RagError> {
            Ok(Vec::new())
        }

        async fn add_chunks(&self, _chunks: Vec<Chunk>) -> Result<Vec<String>, RagError> {
            Ok(Vec::new())
        }
    }

    fn batch(sources: &[&str]) -> Vec<String> {
        sources.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn partitions_preserve_input_order() {
        let index = FixedIndex {
            known: batch(&["b", "d"]),
            failing: None,
        };
        let (cached, uncached) = filter_uncached(&index, &batch(&["a", "b", "c", "d"])).await;
        assert_eq!(cached, batch(&["b", "d"]));
        assert_eq!(uncached, batch(&["a", "c"]));
    }

    #[tokio::test]
    async fn duplicates_are_resolved_independently() {
        let index = FixedIndex {
            known: batch(&["a"]),
            failing: None,
        };
        let (cached, uncached) = filter_uncached(&index, &batch(&["a", "a", "b", "b"])).await;
        assert_eq!(cached, batch(&["a", "a"]));
        assert_eq!(uncached, batch(&["b", "b"]));
    }

    #[tokio::test]
    async fn existence_failures_fail_open() {
        let index = FixedIndex {
            known: batch(&["a"]),
            failing: Some("broken".into()),
        };
        let (cached, uncached) = filter_uncached(&index, &batch(&["broken", "a"])).await;
        assert_eq!(cached, batch(&["a"]));
        assert_eq!(uncached, batch(&["broken"]));
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let index = FixedIndex {
            known: batch(&["x"]),
            failing: None,
        };
        let sources = batch(&["x", "y", "x"]);
        let first = filter_uncached(&index, &sources).await;
        let second = filter_uncached(&index, &sources).await;
        assert_eq!(first, second);
    }
}
