//! Batch embedding backfill for entries without a content vector.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::embedding::TextEmbedder;
use crate::store::{EntryFilter, EntryStore};

/// Number of entries embedded per batch call.
const BATCH_SIZE: usize = 10;

/// Finds an owner's entries lacking a content vector and populates them.
///
/// The selection predicate makes the job idempotent: entries that get a
/// vector are not picked up again, entries skipped because their embedding
/// came back empty are retried on the next invocation. There is no
/// automatic retry within a run, and store failures are absorbed per the
/// degrade-over-error policy.
pub struct EmbeddingBackfill {
    store: Arc<dyn EntryStore>,
    embedder: Arc<TextEmbedder>,
}

impl EmbeddingBackfill {
    /// Create a new backfill job.
    pub fn new(store: Arc<dyn EntryStore>, embedder: Arc<TextEmbedder>) -> Self {
        Self { store, embedder }
    }

    /// Backfill the owner's vectorless entries. Returns the number of
    /// entries updated.
    pub async fn run(&self, owner_id: &str) -> usize {
        let filter = EntryFilter::new().with_missing_vector();
        let entries = match self.store.fetch(owner_id, &filter).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "backfill fetch failed");
                return 0;
            }
        };

        if entries.is_empty() {
            return 0;
        }
        debug!(count = entries.len(), "backfilling embeddings");

        let mut updated = 0;
        for batch in entries.chunks(BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|entry| entry.embedding_text()).collect();
            let vectors = self.embedder.embed_batch(&texts).await;

            for (entry, vector) in batch.iter().zip(vectors) {
                if vector.is_empty() {
                    // Left without a vector; a later run retries it.
                    continue;
                }
                match self.store.write_vector(entry.id, &vector).await {
                    Ok(()) => updated += 1,
                    Err(e) => {
                        warn!(entry_id = %entry.id, error = %e, "vector write failed");
                    }
                }
            }
        }

        debug!(updated, "backfill completed");
        updated
    }
}
