//! Fusion of semantic and keyword result sets.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::search::types::SearchHit;

/// Channel weights for hybrid score combination.
///
/// Each weight is bounded `[0, 1]` but the pair is deliberately not
/// required to sum to 1.0: callers wanting a normalized combined scale are
/// responsible for choosing weights that provide one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Weight of the semantic similarity score.
    pub semantic: f32,
    /// Weight of the keyword overlap score.
    pub keyword: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            semantic: 0.7,
            keyword: 0.3,
        }
    }
}

impl FusionWeights {
    /// Create a new weight pair.
    pub fn new(semantic: f32, keyword: f32) -> Self {
        Self { semantic, keyword }
    }
}

/// Merge semantic and keyword hits into one ranked list of at most `limit`
/// results.
///
/// Every entry appearing in either input appears exactly once in the
/// output, with a score missing from one channel defaulting to 0.0 and
/// `combined = semantic * weights.semantic + keyword * weights.keyword`.
/// Ties keep first-seen order: semantic hits in their order, then
/// keyword-only hits in theirs.
pub fn fuse(
    semantic: Vec<SearchHit>,
    keyword: Vec<SearchHit>,
    weights: FusionWeights,
    limit: usize,
) -> Vec<SearchHit> {
    let mut merged: Vec<SearchHit> = Vec::with_capacity(semantic.len() + keyword.len());
    let mut positions: HashMap<Uuid, usize> = HashMap::new();

    for mut hit in semantic {
        hit.similarity_score = Some(hit.similarity_score.unwrap_or(0.0));
        hit.keyword_score = Some(0.0);
        positions.insert(hit.entry.id, merged.len());
        merged.push(hit);
    }

    for hit in keyword {
        let keyword_score = hit.keyword_score.unwrap_or(0.0);
        match positions.get(&hit.entry.id) {
            Some(&index) => {
                merged[index].keyword_score = Some(keyword_score);
            }
            None => {
                let mut hit = hit;
                hit.similarity_score = Some(0.0);
                hit.keyword_score = Some(keyword_score);
                positions.insert(hit.entry.id, merged.len());
                merged.push(hit);
            }
        }
    }

    for hit in &mut merged {
        let semantic_score = hit.similarity_score.unwrap_or(0.0);
        let keyword_score = hit.keyword_score.unwrap_or(0.0);
        hit.combined_score =
            Some(semantic_score * weights.semantic + keyword_score * weights.keyword);
    }

    merged.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
    });
    merged.truncate(limit);
    merged
}
