//! Application settings for chunking and retrieval.
//!
//! Defaults mirror the deployment this core was carved out of; every value
//! can be overridden from the environment (a `.env` file is honored when
//! present). Unparsable overrides fall back to the default with a warning
//! rather than failing startup.

use std::env;

use crate::chunking::ChunkConfig;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
pub const DEFAULT_RETRIEVAL_K: usize = 5;

/// Tunable settings consumed by the ingestion and query pipelines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters of shared context between adjacent chunks.
    pub chunk_overlap: usize,
    /// Number of passages requested per similarity search.
    pub retrieval_k: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            retrieval_k: DEFAULT_RETRIEVAL_K,
        }
    }
}

impl Settings {
    /// Builds settings from `CITESMITH_CHUNK_SIZE`, `CITESMITH_CHUNK_OVERLAP`,
    /// and `CITESMITH_RETRIEVAL_K`, loading a `.env` file first when one
    /// exists.
    ///
    /// A zero `retrieval_k` is rejected here (a search for zero passages is
    /// never meant) and replaced with the default. Chunk size/overlap are
    /// validated later by [`ChunkConfig::validate`], where the failure is
    /// fatal to the split call rather than to startup.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let retrieval_k = env_usize("CITESMITH_RETRIEVAL_K", defaults.retrieval_k);
        let retrieval_k = if retrieval_k == 0 {
            tracing::warn!(
                default = defaults.retrieval_k,
                "CITESMITH_RETRIEVAL_K must be positive; using default"
            );
            defaults.retrieval_k
        } else {
            retrieval_k
        };

        Self {
            chunk_size: env_usize("CITESMITH_CHUNK_SIZE", defaults.chunk_size),
            chunk_overlap: env_usize("CITESMITH_CHUNK_OVERLAP", defaults.chunk_overlap),
            retrieval_k,
        }
    }

    /// The chunking parameters as the splitter consumes them.
    pub fn chunking(&self) -> ChunkConfig {
        ChunkConfig::new(self.chunk_size, self.chunk_overlap)
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "unparsable setting; using default");
            default
        }),
        Err(_) => default,
    }
}
