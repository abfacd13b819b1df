//! Result types shared by the search engines.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// A single scored search result.
///
/// Which scores are present depends on the channel that produced the hit:
/// semantic search fills `similarity_score`, keyword search fills
/// `keyword_score`, and fusion fills all three (with 0.0 for a channel the
/// entry was absent from).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched entry.
    pub entry: Entry,
    /// Cosine similarity against the query vector (if semantically scored).
    pub similarity_score: Option<f32>,
    /// Query word overlap fraction (if keyword scored).
    pub keyword_score: Option<f32>,
    /// Weighted combination of the two (if fused).
    pub combined_score: Option<f32>,
}

impl SearchHit {
    /// Create a hit with no scores attached.
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            similarity_score: None,
            keyword_score: None,
            combined_score: None,
        }
    }

    /// Set the semantic similarity score.
    pub fn with_similarity_score(mut self, score: f32) -> Self {
        self.similarity_score = Some(score);
        self
    }

    /// Set the keyword overlap score.
    pub fn with_keyword_score(mut self, score: f32) -> Self {
        self.keyword_score = Some(score);
        self
    }
}
