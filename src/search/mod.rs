//! Search engines for journal entries.
//!
//! Three channels share one request envelope: semantic search ranks by
//! cosine similarity against stored content vectors, keyword search scores
//! by query word overlap, and hybrid search fuses the two with caller
//! supplied weights.

pub mod engine;
pub mod fusion;
pub mod keyword;
pub mod request;
pub mod semantic;
pub mod types;

pub use engine::{HybridConfig, JournalSearchEngine};
pub use fusion::{FusionWeights, fuse};
pub use keyword::KeywordSearchEngine;
pub use request::SearchRequest;
pub use semantic::SemanticSearchEngine;
pub use types::SearchHit;
