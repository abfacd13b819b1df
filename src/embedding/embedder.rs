//! Async text embedder with a bounded inference worker pool.

use std::sync::{Arc, OnceLock};

use tokio::sync::oneshot;
use tracing::warn;

use crate::embedding::config::EmbeddingConfig;
use crate::embedding::model::HashedFeatureModel;
use crate::error::{KirokuError, Result};
use crate::vector::Vector;

struct EmbedderState {
    config: EmbeddingConfig,
    model: OnceLock<HashedFeatureModel>,
}

impl EmbedderState {
    /// The model is constructed at most once, on first use. The
    /// configuration was validated when the embedder was built, so the
    /// deferred construction cannot fail.
    fn model(&self) -> &HashedFeatureModel {
        self.model
            .get_or_init(|| HashedFeatureModel::with_dimension(self.config.dimension))
    }
}

/// Converts text into fixed-length vectors without blocking the caller.
///
/// Inference runs on a dedicated pool of at least two worker threads, fixed
/// at construction, so concurrent embedding requests queue on the pool
/// instead of serializing the async request flow. There is no mid-flight
/// cancellation: a dispatched embedding runs to completion even if the
/// caller stops waiting.
///
/// Failure policy: any internal error during generation degrades to an
/// empty vector. Downstream callers treat empty vectors as "no signal".
pub struct TextEmbedder {
    state: Arc<EmbedderState>,
    pool: rayon::ThreadPool,
}

impl TextEmbedder {
    /// Create an embedder with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(EmbeddingConfig::default())
    }

    /// Create an embedder with the given configuration.
    pub fn with_config(config: EmbeddingConfig) -> Result<Self> {
        // Surface configuration problems here instead of at first use.
        HashedFeatureModel::load(&config)?;
        if config.workers < 2 {
            return Err(KirokuError::invalid_config(format!(
                "embedding worker pool needs at least 2 threads, got {}",
                config.workers
            )));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|index| format!("kiroku-embed-{index}"))
            .build()
            .map_err(|e| KirokuError::embedding(format!("failed to create worker pool: {e}")))?;

        Ok(Self {
            state: Arc::new(EmbedderState {
                config,
                model: OnceLock::new(),
            }),
            pool,
        })
    }

    /// Output vector dimension.
    pub fn dimension(&self) -> usize {
        self.state.config.dimension
    }

    /// Embed a single text.
    ///
    /// Blank or whitespace-only input maps to an empty vector.
    pub async fn embed(&self, text: &str) -> Vector {
        if text.trim().is_empty() {
            return Vector::empty();
        }

        let state = Arc::clone(&self.state);
        let text = text.to_string();
        let (tx, rx) = oneshot::channel();

        self.pool.spawn(move || {
            let vector = state.model().encode(&text);
            // The receiver may have gone away; nothing to do then.
            let _ = tx.send(vector);
        });

        match rx.await {
            Ok(vector) => vector,
            Err(_) => {
                warn!("embedding worker dropped without a result, returning empty vector");
                Vector::empty()
            }
        }
    }

    /// Embed a batch of texts, preserving input order.
    ///
    /// Produces exactly one vector per input; blank inputs map to empty
    /// vectors at their position.
    pub async fn embed_batch(&self, texts: &[String]) -> Vec<Vector> {
        if texts.is_empty() {
            return Vec::new();
        }

        let state = Arc::clone(&self.state);
        let texts = texts.to_vec();
        let count = texts.len();
        let (tx, rx) = oneshot::channel();

        self.pool.spawn(move || {
            let vectors: Vec<Vector> = texts
                .iter()
                .map(|text| {
                    if text.trim().is_empty() {
                        Vector::empty()
                    } else {
                        state.model().encode(text)
                    }
                })
                .collect();
            let _ = tx.send(vectors);
        });

        match rx.await {
            Ok(vectors) => vectors,
            Err(_) => {
                warn!("batch embedding worker dropped without a result");
                vec![Vector::empty(); count]
            }
        }
    }
}
