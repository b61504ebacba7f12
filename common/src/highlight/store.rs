//! Per-question highlight persistence behind a string key-value port.

use std::collections::BTreeMap;

use super::error::StorageError;
use super::Highlight;
use crate::question::QuestionId;
use crate::study_const::HIGHLIGHTS_STORAGE_KEY;

/// String key-value backing for the store (browser localStorage in the app).
pub trait HighlightStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage for native tests; `unavailable()` stands in for a
/// browser with storage disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage whose every call fails, like a browser with storage disabled.
    pub fn unavailable() -> Self {
        Self { items: BTreeMap::new(), unavailable: true }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|s| s.as_str())
    }
}

impl HighlightStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whether the last write reached the backing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Saved,
    /// Kept in memory only; lost on reload.
    Degraded(StorageError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }
}

/// Owns every highlight record, keyed by question.
///
/// The whole collection is written back on every mutation, so each call
/// either fully persists or leaves storage as it was.
#[derive(Debug)]
pub struct HighlightStore<S: HighlightStorage> {
    storage: S,
    collection: BTreeMap<QuestionId, Vec<Highlight>>,
}

impl<S: HighlightStorage> HighlightStore<S> {
    /// Load the persisted collection. Unreadable or malformed data starts
    /// an empty collection instead of failing.
    pub fn open(storage: S) -> Self {
        let collection = match storage.get_item(HIGHLIGHTS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(collection) => collection,
                Err(e) => {
                    tracing::warn!("Discarding unreadable highlight collection: {e}");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Highlight storage unavailable, highlights will not persist: {e}");
                BTreeMap::new()
            }
        };
        Self { storage, collection }
    }

    pub fn get(&self, question_id: &QuestionId) -> &[Highlight] {
        self.collection.get(question_id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Replace the sequence for one question. An empty sequence removes the entry.
    pub fn set(&mut self, question_id: &QuestionId, highlights: Vec<Highlight>) -> Persistence {
        if highlights.is_empty() {
            self.collection.remove(question_id);
        } else {
            self.collection.insert(question_id.clone(), highlights);
        }
        self.persist()
    }

    pub fn clear(&mut self, question_id: &QuestionId) -> Persistence {
        self.set(question_id, Vec::new())
    }

    pub fn clear_all(&mut self) -> Persistence {
        self.collection.clear();
        self.persist()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.collection.keys()
    }

    pub fn all(&self) -> impl Iterator<Item = &Highlight> {
        self.collection.values().flatten()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Persistence {
        let result = serde_json::to_string(&self.collection)
            .map_err(|e| StorageError::Serialize(e.to_string()))
            .and_then(|raw| self.storage.set_item(HIGHLIGHTS_STORAGE_KEY, &raw));
        match result {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!("Highlight change kept in memory only: {e}");
                Persistence::Degraded(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightId;

    fn h(id: u64, start: usize, end: usize) -> Highlight {
        Highlight::new(HighlightId(id), start, end, "x").unwrap()
    }

    #[test]
    fn test_get_missing_question_is_empty() {
        let store = HighlightStore::open(MemoryStorage::new());
        assert!(store.get(&QuestionId::from("q1")).is_empty());
    }

    #[test]
    fn test_set_persists_and_reopens() {
        let q = QuestionId::from("q1");
        let mut store = HighlightStore::open(MemoryStorage::new());
        assert!(store.set(&q, vec![h(1, 0, 3), h(2, 5, 8)]).is_saved());

        let reopened = HighlightStore::open(store.storage().clone());
        assert_eq!(reopened.get(&q), &[h(1, 0, 3), h(2, 5, 8)]);
    }

    #[test]
    fn test_clear_drops_entry() {
        let q1 = QuestionId::from("q1");
        let q2 = QuestionId::from("q2");
        let mut store = HighlightStore::open(MemoryStorage::new());
        store.set(&q1, vec![h(1, 0, 3)]);
        store.set(&q2, vec![h(2, 0, 3)]);
        store.clear(&q1);
        assert!(store.get(&q1).is_empty());
        assert_eq!(store.question_ids().collect::<Vec<_>>(), vec![&q2]);

        store.clear_all();
        assert_eq!(store.question_ids().count(), 0);
        assert_eq!(store.storage().raw(HIGHLIGHTS_STORAGE_KEY), Some("{}"));
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(HIGHLIGHTS_STORAGE_KEY, "{not json").unwrap();
        let store = HighlightStore::open(storage);
        assert_eq!(store.all().count(), 0);
    }

    #[test]
    fn test_unavailable_storage_degrades_to_memory() {
        let q = QuestionId::from("q1");
        let mut store = HighlightStore::open(MemoryStorage::unavailable());
        let persistence = store.set(&q, vec![h(1, 0, 3)]);
        assert!(matches!(persistence, Persistence::Degraded(StorageError::Unavailable(_))));
        assert_eq!(store.get(&q), &[h(1, 0, 3)]);
    }
}
