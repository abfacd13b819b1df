//! Backfill job scenarios: interaction with search and repeated runs.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use kiroku::clock::FixedClock;
use kiroku::embedding::TextEmbedder;
use kiroku::entry::Entry;
use kiroku::search::{JournalSearchEngine, SearchRequest};
use kiroku::store::MemoryEntryStore;

fn engine(store: Arc<MemoryEntryStore>) -> JournalSearchEngine {
    JournalSearchEngine::new(
        store,
        Arc::new(TextEmbedder::new().unwrap()),
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        )),
    )
}

#[tokio::test]
async fn backfill_makes_entries_semantically_searchable() {
    let store = Arc::new(MemoryEntryStore::new());
    store.insert(Entry::new(
        "alice",
        "Garden update",
        "planted tomatoes in the garden",
        "content",
        7,
    ));
    let engine = engine(Arc::clone(&store));

    let request =
        SearchRequest::new("alice", "tomatoes in the garden").with_similarity_threshold(0.0);
    assert!(engine.semantic_search(&request).await.is_empty());

    assert_eq!(engine.backfill_embeddings("alice").await, 1);

    let hits = engine.semantic_search(&request).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.title, "Garden update");
}

#[tokio::test]
async fn rerun_only_picks_up_new_entries() {
    let store = Arc::new(MemoryEntryStore::new());
    for i in 0..15 {
        store.insert(Entry::new(
            "alice",
            format!("entry {i}"),
            "some daily notes",
            "calm",
            5,
        ));
    }
    let engine = engine(Arc::clone(&store));
    assert_eq!(engine.backfill_embeddings("alice").await, 15);

    store.insert(Entry::new("alice", "late entry", "added afterwards", "calm", 5));
    assert_eq!(engine.backfill_embeddings("alice").await, 1);
    assert_eq!(engine.backfill_embeddings("alice").await, 0);
}
