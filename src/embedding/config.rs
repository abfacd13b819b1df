//! Configuration for embedding generation.

use serde::{Deserialize, Serialize};

/// Default embedding dimension, matching the 384-wide vector column the
/// entry store is provisioned with.
pub const DEFAULT_DIMENSION: usize = 384;

/// Configuration for the text embedder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Output vector dimension.
    pub dimension: usize,
    /// Worker pool size for model inference. Fixed at construction,
    /// minimum 2.
    pub workers: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    num_cpus::get().clamp(2, 8)
}
