//! Entry store collaborator interface and an in-memory implementation.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::entry::Entry;
use crate::error::{KirokuError, Result};
use crate::temporal::DateRange;
use crate::vector::Vector;

/// Filters applied by [`EntryStore::fetch`].
///
/// An absent filter means no constraint. All predicates are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Restrict to entries created within this range.
    pub date_range: Option<DateRange>,
    /// Restrict to entries with this mood label.
    pub mood: Option<String>,
    /// Restrict to entries in this collection.
    pub collection_id: Option<Uuid>,
    /// Restrict to entries whose title or body contains this text,
    /// case-insensitively.
    pub text_substring: Option<String>,
    /// Restrict to entries lacking a content vector.
    pub missing_vector: bool,
}

impl EntryFilter {
    /// Create an unconstrained filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to entries created within `range`.
    pub fn with_date_range(mut self, range: Option<DateRange>) -> Self {
        self.date_range = range;
        self
    }

    /// Restrict to entries with the given mood label.
    pub fn with_mood(mut self, mood: Option<String>) -> Self {
        self.mood = mood;
        self
    }

    /// Restrict to entries in the given collection.
    pub fn with_collection(mut self, collection_id: Option<Uuid>) -> Self {
        self.collection_id = collection_id;
        self
    }

    /// Restrict to entries whose title or body contains `text`.
    pub fn with_text_substring(mut self, text: impl Into<String>) -> Self {
        self.text_substring = Some(text.into());
        self
    }

    /// Restrict to entries lacking a content vector.
    pub fn with_missing_vector(mut self) -> Self {
        self.missing_vector = true;
        self
    }
}

/// Persistence collaborator for journal entries.
///
/// The store exclusively owns entry rows; this crate only reads them and,
/// on the backfill path, writes the content vector back. Implementations
/// must tolerate concurrent calls from multiple in-flight searches.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Fetch the owner's entries matching the filter.
    async fn fetch(&self, owner_id: &str, filter: &EntryFilter) -> Result<Vec<Entry>>;

    /// Persist a content vector onto an entry.
    async fn write_vector(&self, entry_id: Uuid, vector: &Vector) -> Result<()>;
}

/// In-memory entry store.
///
/// Fetch returns matches in insertion order, which doubles as the
/// documented tie-break order for equal search scores.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the store.
    pub fn insert(&self, entry: Entry) {
        self.entries.write().push(entry);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn matches(entry: &Entry, owner_id: &str, filter: &EntryFilter) -> bool {
        if entry.owner_id != owner_id {
            return false;
        }
        if let Some(range) = &filter.date_range
            && !range.contains(entry.created_at)
        {
            return false;
        }
        if let Some(mood) = &filter.mood
            && entry.mood != *mood
        {
            return false;
        }
        if let Some(collection_id) = &filter.collection_id
            && entry.collection_id.as_ref() != Some(collection_id)
        {
            return false;
        }
        if let Some(text) = &filter.text_substring {
            let needle = text.to_lowercase();
            if !entry.title.to_lowercase().contains(&needle)
                && !entry.body.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if filter.missing_vector && !entry.lacks_vector() {
            return false;
        }
        true
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn fetch(&self, owner_id: &str, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let entries = self.entries.read();
        Ok(entries
            .iter()
            .filter(|entry| Self::matches(entry, owner_id, filter))
            .cloned()
            .collect())
    }

    async fn write_vector(&self, entry_id: Uuid, vector: &Vector) -> Result<()> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| KirokuError::not_found(format!("entry {entry_id}")))?;
        entry.content_vector = Some(vector.clone());
        entry.updated_at = Utc::now();
        Ok(())
    }
}
