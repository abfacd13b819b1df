//! Keyword search by query word overlap.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::entry::Entry;
use crate::search::request::SearchRequest;
use crate::search::types::SearchHit;
use crate::store::{EntryFilter, EntryStore};
use crate::temporal::TemporalParser;

/// Scores entries by the fraction of distinct query words found in their
/// title and body.
///
/// This is a coarse recall aid alongside semantic search, not a ranked
/// inverted index; score ties are expected and preserved in store order.
pub struct KeywordSearchEngine {
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    temporal: TemporalParser,
}

impl KeywordSearchEngine {
    /// Create a new keyword search engine.
    pub fn new(store: Arc<dyn EntryStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            temporal: TemporalParser::new(),
        }
    }

    /// Search the owner's entries, returning at most `request.limit` hits
    /// ordered by descending keyword score.
    ///
    /// Candidates are prefiltered at the store to entries containing the
    /// whole query as a case-insensitive substring; date, mood, and
    /// collection filters resolve exactly as in semantic search.
    pub async fn search(&self, request: &SearchRequest) -> Vec<SearchHit> {
        let date_range = request.effective_date_range(&self.temporal, self.clock.now());

        let filter = EntryFilter::new()
            .with_date_range(date_range)
            .with_mood(request.mood.clone())
            .with_collection(request.collection_id)
            .with_text_substring(request.query.clone());

        let entries = match self.store.fetch(&request.owner_id, &filter).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "entry fetch failed, degrading to empty keyword results");
                return Vec::new();
            }
        };

        let mut hits: Vec<SearchHit> = entries
            .into_iter()
            .map(|entry| {
                let score = keyword_score(&request.query, &entry);
                SearchHit::new(entry).with_keyword_score(score)
            })
            .collect();

        hits.sort_by(|a, b| {
            b.keyword_score
                .partial_cmp(&a.keyword_score)
                .unwrap_or(Ordering::Equal)
        });
        hits.truncate(request.limit);

        debug!(count = hits.len(), "keyword search completed");
        hits
    }
}

/// Fraction of distinct lowercase query words found as substrings of the
/// entry's title and body. An empty query scores 0.
pub fn keyword_score(query: &str, entry: &Entry) -> f32 {
    let lowered = query.to_lowercase();
    let words: HashSet<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let haystack = format!("{} {}", entry.title, entry.body).to_lowercase();
    let matched = words.iter().filter(|word| haystack.contains(**word)).count();

    matched as f32 / words.len() as f32
}
