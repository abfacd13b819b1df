//! Semantic search over stored content vectors.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::embedding::TextEmbedder;
use crate::search::request::SearchRequest;
use crate::search::types::SearchHit;
use crate::store::{EntryFilter, EntryStore};
use crate::temporal::TemporalParser;
use crate::vector::cosine_similarity;

/// Ranks a user's entries by cosine similarity between the embedded query
/// and their stored content vectors.
///
/// Store and embedding failures degrade to an empty result list; this
/// engine never surfaces an error for a single search call.
pub struct SemanticSearchEngine {
    store: Arc<dyn EntryStore>,
    embedder: Arc<TextEmbedder>,
    clock: Arc<dyn Clock>,
    temporal: TemporalParser,
}

impl SemanticSearchEngine {
    /// Create a new semantic search engine.
    pub fn new(
        store: Arc<dyn EntryStore>,
        embedder: Arc<TextEmbedder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            embedder,
            clock,
            temporal: TemporalParser::new(),
        }
    }

    /// Search the owner's entries, returning at most `request.limit` hits
    /// ordered by descending similarity.
    ///
    /// Entries without a content vector are ineligible rather than scored
    /// zero; a query that cannot be embedded yields no results.
    pub async fn search(&self, request: &SearchRequest) -> Vec<SearchHit> {
        let date_range = request.effective_date_range(&self.temporal, self.clock.now());

        let query_vector = self.embedder.embed(&request.query).await;
        if query_vector.is_empty() {
            debug!(query = %request.query, "query produced no embedding, no semantic results");
            return Vec::new();
        }

        let filter = EntryFilter::new()
            .with_date_range(date_range)
            .with_mood(request.mood.clone())
            .with_collection(request.collection_id);

        let entries = match self.store.fetch(&request.owner_id, &filter).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "entry fetch failed, degrading to empty semantic results");
                return Vec::new();
            }
        };

        let mut hits: Vec<SearchHit> = entries
            .into_iter()
            .filter_map(|entry| {
                let vector = entry.content_vector.as_ref()?;
                if vector.is_empty() {
                    return None;
                }
                let similarity = cosine_similarity(&query_vector, vector);
                if similarity < request.similarity_threshold {
                    return None;
                }
                Some(SearchHit::new(entry).with_similarity_score(similarity))
            })
            .collect();

        // Stable sort keeps store order for equal scores.
        hits.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(Ordering::Equal)
        });
        hits.truncate(request.limit);

        debug!(count = hits.len(), "semantic search completed");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Datelike, TimeZone, Utc};

    use crate::clock::FixedClock;
    use crate::entry::Entry;
    use crate::error::{KirokuError, Result};
    use crate::store::MemoryEntryStore;
    use crate::vector::Vector;

    struct FailingStore;

    #[async_trait]
    impl EntryStore for FailingStore {
        async fn fetch(&self, _owner_id: &str, _filter: &EntryFilter) -> Result<Vec<Entry>> {
            Err(KirokuError::store("connection refused"))
        }

        async fn write_vector(&self, _entry_id: uuid::Uuid, _vector: &Vector) -> Result<()> {
            Err(KirokuError::store("connection refused"))
        }
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        ))
    }

    fn engine_with(store: Arc<dyn EntryStore>) -> SemanticSearchEngine {
        SemanticSearchEngine::new(store, Arc::new(TextEmbedder::new().unwrap()), fixed_clock())
    }

    async fn embedded_entry(embedder: &TextEmbedder, owner: &str, title: &str, body: &str) -> Entry {
        let entry = Entry::new(owner, title, body, "calm", 5);
        let vector = embedder.embed(&entry.embedding_text()).await;
        entry.with_content_vector(vector)
    }

    #[tokio::test]
    async fn test_results_respect_threshold_and_order() {
        let embedder = TextEmbedder::new().unwrap();
        let store = Arc::new(MemoryEntryStore::new());
        store.insert(
            embedded_entry(&embedder, "alice", "Forest hike", "long hike through the forest").await,
        );
        store.insert(
            embedded_entry(&embedder, "alice", "Hiking trip", "a hike in the hills today").await,
        );
        store.insert(
            embedded_entry(&embedder, "alice", "Tax forms", "filled in tax paperwork").await,
        );

        let engine = engine_with(store);
        let request = SearchRequest::new("alice", "hike in the forest")
            .with_similarity_threshold(0.05);
        let hits = engine.search(&request).await;

        assert!(!hits.is_empty());
        assert!(hits.len() <= request.limit);
        for hit in &hits {
            assert!(hit.similarity_score.unwrap() >= 0.05);
        }
        for pair in hits.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }

    #[tokio::test]
    async fn test_entries_without_vectors_are_ineligible() {
        let store = Arc::new(MemoryEntryStore::new());
        store.insert(Entry::new("alice", "Bare entry", "no vector here", "calm", 5));

        let engine = engine_with(store);
        let request =
            SearchRequest::new("alice", "no vector here").with_similarity_threshold(0.0);
        assert!(engine.search(&request).await.is_empty());
    }

    #[tokio::test]
    async fn test_unembeddable_query_yields_no_results() {
        let embedder = TextEmbedder::new().unwrap();
        let store = Arc::new(MemoryEntryStore::new());
        store.insert(embedded_entry(&embedder, "alice", "Anything", "at all").await);

        let engine = engine_with(store);
        let request = SearchRequest::new("alice", "   ").with_similarity_threshold(0.0);
        assert!(engine.search(&request).await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_empty() {
        let engine = engine_with(Arc::new(FailingStore));
        let request = SearchRequest::new("alice", "anything");
        assert!(engine.search(&request).await.is_empty());
    }

    #[tokio::test]
    async fn test_temporal_phrase_overrides_explicit_range() {
        let embedder = TextEmbedder::new().unwrap();
        let store = Arc::new(MemoryEntryStore::new());

        let yesterday =
            embedded_entry(&embedder, "alice", "Evening tea", "green tea and a good book")
                .await
                .with_created_at(Utc.with_ymd_and_hms(2024, 3, 14, 20, 0, 0).unwrap());
        let vector = yesterday.content_vector.clone().unwrap();
        store.insert(yesterday);

        let last_month = Entry::new("alice", "Evening tea", "green tea and a good book", "calm", 5)
            .with_created_at(Utc.with_ymd_and_hms(2024, 2, 1, 20, 0, 0).unwrap())
            .with_content_vector(vector);
        store.insert(last_month);

        let engine = engine_with(store);
        // Explicit range covers February, but "yesterday" in the query wins.
        let explicit = crate::temporal::DateRange::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let request = SearchRequest::new("alice", "tea yesterday")
            .with_similarity_threshold(0.0)
            .with_date_range(explicit);

        let hits = engine.search(&request).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.created_at.day(), 14);
    }
}
