//! Search request envelope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{KirokuError, Result};
use crate::temporal::DateRange;

/// Default number of results returned.
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound on the result limit.
pub const MAX_LIMIT: usize = 50;
/// Default minimum similarity score for semantic results.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.1;

/// Per-call search request.
///
/// The engines assume the documented bounds hold (limit 1-50, threshold
/// within `[0, 1]`); a request layer should call [`SearchRequest::validate`]
/// before handing the envelope in. The explicit date range is a fallback:
/// a range implied by the query text overrides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The user whose entries are searched.
    pub owner_id: String,
    /// Raw query text.
    pub query: String,
    /// Maximum number of results (1-50).
    pub limit: usize,
    /// Minimum similarity score for semantic results (0.0-1.0).
    pub similarity_threshold: f32,
    /// Restrict results to this mood label.
    pub mood: Option<String>,
    /// Restrict results to this collection.
    pub collection_id: Option<Uuid>,
    /// Explicit date range, used when the query text implies none.
    pub date_range: Option<DateRange>,
}

impl SearchRequest {
    /// Create a request with default limit and threshold.
    pub fn new(owner_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            query: query.into(),
            limit: DEFAULT_LIMIT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            mood: None,
            collection_id: None,
            date_range: None,
        }
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Restrict results to a mood label.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Restrict results to a collection.
    pub fn with_collection(mut self, collection_id: Uuid) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Set the explicit date range fallback.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Resolve the date range that actually applies to this request.
    ///
    /// A range implied by the query text overrides the explicit one.
    pub fn effective_date_range(
        &self,
        parser: &crate::temporal::TemporalParser,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Option<DateRange> {
        parser.parse(&self.query, now).or(self.date_range)
    }

    /// Check the documented parameter bounds.
    ///
    /// Boundary helper for request layers; the engines themselves do not
    /// re-validate.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(KirokuError::invalid_argument(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(KirokuError::invalid_argument(format!(
                "similarity threshold must be within [0.0, 1.0], got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}
