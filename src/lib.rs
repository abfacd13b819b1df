//! # Kiroku
//!
//! A semantic and hybrid search library for personal journal entries.
//!
//! ## Features
//!
//! - Deterministic text embedding with a lazily-loaded hashed feature model
//! - Cosine similarity scoring over stored content vectors
//! - Natural-language date range extraction ("yesterday", "last week", month names)
//! - Semantic, keyword, and weighted hybrid search over an entry store
//! - Batch embedding backfill for entries without a content vector

pub mod backfill;
pub mod clock;
pub mod embedding;
pub mod entry;
pub mod error;
pub mod search;
pub mod store;
pub mod temporal;
pub mod vector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
