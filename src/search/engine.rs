//! Journal search facade combining the semantic and keyword channels.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backfill::EmbeddingBackfill;
use crate::clock::Clock;
use crate::embedding::TextEmbedder;
use crate::search::fusion::{FusionWeights, fuse};
use crate::search::keyword::KeywordSearchEngine;
use crate::search::request::SearchRequest;
use crate::search::semantic::SemanticSearchEngine;
use crate::search::types::SearchHit;
use crate::store::EntryStore;

/// Tuning knobs for hybrid search candidate gathering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Both channels gather `limit * candidate_multiplier` candidates
    /// before fusion re-ranks and truncates to the caller's limit.
    pub candidate_multiplier: usize,
    /// Similarity threshold used for the semantic channel inside hybrid
    /// search, deliberately low so fusion sees a wide candidate set.
    pub semantic_floor: f32,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            candidate_multiplier: 2,
            semantic_floor: 0.05,
        }
    }
}

/// Entry point for the three search operations: semantic search, hybrid
/// search, and the embedding backfill job.
pub struct JournalSearchEngine {
    semantic: SemanticSearchEngine,
    keyword: KeywordSearchEngine,
    backfill: EmbeddingBackfill,
    config: HybridConfig,
}

impl JournalSearchEngine {
    /// Create an engine with the default hybrid configuration.
    pub fn new(
        store: Arc<dyn EntryStore>,
        embedder: Arc<TextEmbedder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_config(store, embedder, clock, HybridConfig::default())
    }

    /// Create an engine with a custom hybrid configuration.
    pub fn with_config(
        store: Arc<dyn EntryStore>,
        embedder: Arc<TextEmbedder>,
        clock: Arc<dyn Clock>,
        config: HybridConfig,
    ) -> Self {
        let semantic =
            SemanticSearchEngine::new(Arc::clone(&store), Arc::clone(&embedder), Arc::clone(&clock));
        let keyword = KeywordSearchEngine::new(Arc::clone(&store), clock);
        let backfill = EmbeddingBackfill::new(store, embedder);
        Self {
            semantic,
            keyword,
            backfill,
            config,
        }
    }

    /// Semantic-only search.
    pub async fn semantic_search(&self, request: &SearchRequest) -> Vec<SearchHit> {
        self.semantic.search(request).await
    }

    /// Keyword-only search.
    pub async fn keyword_search(&self, request: &SearchRequest) -> Vec<SearchHit> {
        self.keyword.search(request).await
    }

    /// Hybrid search: both channels run concurrently over a widened
    /// candidate set, then fusion combines them with the given weights and
    /// truncates to `request.limit`.
    pub async fn hybrid_search(
        &self,
        request: &SearchRequest,
        weights: FusionWeights,
    ) -> Vec<SearchHit> {
        let candidate_request = request
            .clone()
            .with_limit(request.limit * self.config.candidate_multiplier)
            .with_similarity_threshold(self.config.semantic_floor);

        let (semantic_hits, keyword_hits) = tokio::join!(
            self.semantic.search(&candidate_request),
            self.keyword.search(&candidate_request),
        );

        fuse(semantic_hits, keyword_hits, weights, request.limit)
    }

    /// Backfill content vectors for the owner's entries that lack one.
    /// Returns the number of entries updated.
    pub async fn backfill_embeddings(&self, owner_id: &str) -> usize {
        self.backfill.run(owner_id).await
    }
}
