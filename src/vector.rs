//! Core vector data structure and cosine similarity.

use serde::{Deserialize, Serialize};

/// A dense vector representation for similarity search.
///
/// An empty vector (zero dimensions) is a valid value meaning "no signal":
/// the embedder produces it for blank input or on internal failure, and the
/// similarity function maps it to a score of 0.0 rather than an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// The vector dimensions as floating point values.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a new vector with the given dimensions.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Create an empty (zero-dimension) vector.
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Check if this vector has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Calculate the L2 norm (magnitude) of this vector.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalize this vector to unit length.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.data {
                *value /= norm;
            }
        }
    }

    /// Check if this vector contains any NaN or infinite values.
    pub fn is_valid(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}

/// Calculate the cosine similarity between two vectors.
///
/// Returns a score in `[-1.0, 1.0]`. If either vector is empty, has a zero
/// norm, or the dimensions differ, the result is 0.0 — a defined "no signal"
/// outcome, not an error.
pub fn cosine_similarity(a: &Vector, b: &Vector) -> f32 {
    if a.is_empty() || b.is_empty() || a.dimension() != b.dimension() {
        return 0.0;
    }

    let dot_product: f32 = a.data.iter().zip(b.data.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
