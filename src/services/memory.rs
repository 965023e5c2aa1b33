use crate::models::{NeighborhoodRecord, NewNeighborhood, RecordFilter};
use crate::services::store::{validate_new, NeighborhoodStore, StoreError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Neighborhood store held in process memory
///
/// Used when no database is configured and as the test double for the
/// ranking service. Availability can be switched off to exercise the
/// storage-failure path.
#[derive(Debug)]
pub struct InMemoryStore {
    records: RwLock<Vec<NeighborhoodRecord>>,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store pre-populated with records, in the given order
    pub fn with_records(records: Vec<NeighborhoodRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            available: AtomicBool::new(true),
        }
    }

    /// Load records from a JSON array of `{ name, safety, ... }` objects
    ///
    /// Each entry gets a fresh id; file order becomes storage order.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("failed to read {}: {}", path.display(), e)))?;

        let entries: Vec<NewNeighborhood> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("failed to parse {}: {}", path.display(), e)))?;

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            validate_new(&entry)?;
            records.push(entry.into_record(uuid::Uuid::new_v4().to_string()));
        }

        tracing::info!("Seeded {} neighborhoods from {}", records.len(), path.display());

        Ok(Self::with_records(records))
    }

    /// Simulate the backing store going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        }
    }
}

#[async_trait]
impl NeighborhoodStore for InMemoryStore {
    async fn find(&self, filter: &RecordFilter) -> Result<Vec<NeighborhoodRecord>, StoreError> {
        self.ensure_available()?;

        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn insert(&self, neighborhood: NewNeighborhood) -> Result<NeighborhoodRecord, StoreError> {
        self.ensure_available()?;
        validate_new(&neighborhood)?;

        let record = neighborhood.into_record(uuid::Uuid::new_v4().to_string());
        self.records.write().await.push(record.clone());

        tracing::debug!("Stored neighborhood {} ({})", record.name, record.id);

        Ok(record)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(self.available.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_neighborhood(name: &str) -> NewNeighborhood {
        NewNeighborhood {
            name: name.to_string(),
            safety: 3.0,
            cafes: 2.0,
            parks: 1.0,
            schools: 4.0,
            public_transport: 5.0,
        }
    }

    #[tokio::test]
    async fn test_insert_then_find_in_order() {
        let store = InMemoryStore::new();
        let first = store.insert(new_neighborhood("Oakwood")).await.unwrap();
        let second = store.insert(new_neighborhood("Riverside")).await.unwrap();

        assert_ne!(first.id, second.id);

        let all = store.find(&RecordFilter::all()).await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let store = InMemoryStore::new();
        store.insert(new_neighborhood("Oakwood")).await.unwrap();
        store.insert(new_neighborhood("Riverside")).await.unwrap();

        let found = store.find(&RecordFilter::name_contains("RIVER")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Riverside");
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = InMemoryStore::new();
        store.set_available(false);

        assert!(matches!(
            store.find(&RecordFilter::all()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(!store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_rejects_negative_rating() {
        let store = InMemoryStore::new();
        let mut bad = new_neighborhood("Oakwood");
        bad.cafes = -2.0;

        assert!(matches!(store.insert(bad).await, Err(StoreError::InvalidInput(_))));
        assert!(store.find(&RecordFilter::all()).await.unwrap().is_empty());
    }

    #[test]
    fn test_seed_file_missing() {
        let result = InMemoryStore::from_seed_file("does/not/exist.json");
        assert!(matches!(result, Err(StoreError::Seed(_))));
    }
}
