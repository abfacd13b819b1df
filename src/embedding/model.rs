//! Hashed feature embedding model.

use crate::embedding::config::EmbeddingConfig;
use crate::error::{KirokuError, Result};
use crate::vector::Vector;

/// Feature namespaces, mixed into the hash so a three-letter token and the
/// identical character trigram land in different buckets.
const TOKEN_TAG: u8 = b't';
const TRIGRAM_TAG: u8 = b'g';

/// Weight of character trigram features relative to whole-token features.
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic text embedding model based on signed feature hashing.
///
/// Word tokens and character trigrams are hashed (crc32) into a fixed
/// number of buckets with a hash-derived sign, then the result is
/// L2-normalized. The same text always produces the same vector, and texts
/// sharing vocabulary or subwords land near each other under cosine
/// similarity. No external weights are fetched; "loading" validates the
/// configuration once per process.
#[derive(Debug)]
pub struct HashedFeatureModel {
    dimension: usize,
}

impl HashedFeatureModel {
    /// Load the model for the given configuration.
    ///
    /// Fails only on unusable configuration; this is a fatal setup error,
    /// checked before the model is ever shared with the worker pool.
    pub fn load(config: &EmbeddingConfig) -> Result<Self> {
        if config.dimension < 8 {
            return Err(KirokuError::invalid_config(format!(
                "embedding dimension must be at least 8, got {}",
                config.dimension
            )));
        }
        Ok(Self {
            dimension: config.dimension,
        })
    }

    /// Construct a model for a dimension that has already been validated
    /// by [`HashedFeatureModel::load`].
    pub(crate) fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Output vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Encode text into a normalized vector.
    ///
    /// Blank or whitespace-only input yields an empty vector, not an error.
    pub fn encode(&self, text: &str) -> Vector {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Vector::empty();
        }

        let mut data = vec![0.0f32; self.dimension];
        for token in &tokens {
            self.accumulate(TOKEN_TAG, token.as_bytes(), 1.0, &mut data);

            let chars: Vec<char> = token.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                self.accumulate(TRIGRAM_TAG, trigram.as_bytes(), TRIGRAM_WEIGHT, &mut data);
            }
        }

        let mut vector = Vector::new(data);
        vector.normalize();
        vector
    }

    fn accumulate(&self, tag: u8, feature: &[u8], weight: f32, data: &mut [f32]) {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&[tag]);
        hasher.update(feature);
        let hash = hasher.finalize();

        let bucket = hash as usize % self.dimension;
        let sign = if (hash >> 16) & 1 == 0 { 1.0 } else { -1.0 };
        data[bucket] += sign * weight;
    }
}

/// Tokenize text into lowercase terms, dropping single characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|s| s.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|s| s.len() > 1)
        .map(|s| s.to_string())
        .collect()
}
