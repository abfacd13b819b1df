//! Journal entry data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vector::Vector;

/// A persisted journal entry.
///
/// The store collaborator owns these rows; the search engines only read
/// them. The content vector is derived data: absent until the backfill job
/// (or the entry-update path) computes it, and never mutated by the search
/// engines themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Entry identifier.
    pub id: Uuid,
    /// Identifier of the user that owns this entry.
    pub owner_id: String,
    /// Entry title.
    pub title: String,
    /// Entry body text.
    pub body: String,
    /// Mood label (e.g. "happy", "anxious").
    pub mood: String,
    /// Numeric mood score.
    pub mood_score: i32,
    /// Optional mood image reference.
    pub image_url: Option<String>,
    /// Optional collection this entry belongs to.
    pub collection_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Embedding of the entry text, if one has been computed.
    pub content_vector: Option<Vector>,
}

impl Entry {
    /// Create a new entry with a fresh identifier and current timestamps.
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        mood: impl Into<String>,
        mood_score: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            body: body.into(),
            mood: mood.into(),
            mood_score,
            image_url: None,
            collection_id: None,
            created_at: now,
            updated_at: now,
            content_vector: None,
        }
    }

    /// Set the collection this entry belongs to.
    pub fn with_collection(mut self, collection_id: Uuid) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Set the mood image reference.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the creation timestamp (the update timestamp follows).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Set the content vector.
    pub fn with_content_vector(mut self, vector: Vector) -> Self {
        self.content_vector = Some(vector);
        self
    }

    /// Check whether this entry still needs an embedding.
    ///
    /// An entry with an empty stored vector counts as lacking one, so a
    /// backfill re-run naturally picks it up again.
    pub fn lacks_vector(&self) -> bool {
        self.content_vector.as_ref().is_none_or(|v| v.is_empty())
    }

    /// The text used as embedding input for this entry.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}
