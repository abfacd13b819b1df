//! Text embedding generation.
//!
//! The embedder turns entry and query text into fixed-length vectors. Model
//! inference is CPU-bound, so it runs on a dedicated worker pool and is
//! awaited from the async request flow rather than blocking it.

pub mod config;
pub mod embedder;
pub mod model;

pub use config::EmbeddingConfig;
pub use embedder::TextEmbedder;
pub use model::HashedFeatureModel;
