/// In-process `DocumentStore`
///
/// Each collection lives behind one `DashMap` shard entry, so every write to a
/// collection is applied under that entry's lock. Natural scan order is
/// insertion order. The whole store can be loaded from and saved to a JSON
/// snapshot.
use super::document_store::{Document, DocumentStore, FieldValue, Fields, SortDirection};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredDocument {
    sequence: u64,
    document: Document,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    collections: BTreeMap<String, Vec<Document>>,
}

#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: DashMap<String, HashMap<Uuid, StoredDocument>>,
    sequence: AtomicU64,
    offline: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot. A missing file yields an empty store.
    pub fn load_snapshot(path: &Path) -> AppResult<Self> {
        let store = Self::new();
        if !path.exists() {
            info!("No snapshot at {}, starting with an empty store", path.display());
            return Ok(store);
        }

        let raw = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        let mut total = 0;
        for (name, documents) in snapshot.collections {
            let mut collection = HashMap::with_capacity(documents.len());
            for document in documents {
                let sequence = store.next_sequence();
                collection.insert(document.id, StoredDocument { sequence, document });
                total += 1;
            }
            store.collections.insert(name, collection);
        }

        info!("Loaded {} documents from {}", total, path.display());
        Ok(store)
    }

    /// Write every collection, in natural order, to a JSON snapshot
    pub fn save_snapshot(&self, path: &Path) -> AppResult<()> {
        let collections = self
            .collections
            .iter()
            .map(|entry| (entry.key().clone(), Self::in_natural_order(entry.value())))
            .collect();
        let json = serde_json::to_string_pretty(&Snapshot { collections })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        info!("Snapshot written to {}", path.display());
        Ok(())
    }

    /// Simulate the backing store going away. Every call then fails with
    /// `StoreUnavailable` until it is brought back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    fn ensure_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable(
                "Document store is offline".to_string(),
            ));
        }
        Ok(())
    }

    fn in_natural_order(collection: &HashMap<Uuid, StoredDocument>) -> Vec<Document> {
        let mut stored: Vec<&StoredDocument> = collection.values().collect();
        stored.sort_by_key(|s| s.sequence);
        stored.into_iter().map(|s| s.document.clone()).collect()
    }

    fn not_found(collection: &str, id: Uuid) -> AppError {
        AppError::NotFound(format!("Document {} not found in {}", id, collection))
    }
}

fn merge(document: &mut Document, fields: Fields) {
    document.fields.extend(fields);
    document.version += 1;
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert_one(&self, collection: &str, fields: Fields) -> AppResult<Uuid> {
        self.ensure_online()?;

        let id = Uuid::new_v4();
        let sequence = self.next_sequence();
        let document = Document {
            id,
            version: 1,
            fields,
        };
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, StoredDocument { sequence, document });

        debug!("Inserted document {} into {}", id, collection);
        Ok(id)
    }

    async fn list_all(&self, collection: &str) -> AppResult<Vec<Document>> {
        self.ensure_online()?;

        Ok(self
            .collections
            .get(collection)
            .map(|c| Self::in_natural_order(c.value()))
            .unwrap_or_default())
    }

    async fn list_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> AppResult<Vec<Document>> {
        let mut documents = self.list_all(collection).await?;

        let null = FieldValue::Null;
        documents.sort_by(|a, b| {
            let left = a.fields.get(field).unwrap_or(&null);
            let right = b.fields.get(field).unwrap_or(&null);
            match direction {
                SortDirection::Ascending => left.sort_cmp(right),
                SortDirection::Descending => right.sort_cmp(left),
            }
        });
        Ok(documents)
    }

    async fn get_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Document>> {
        self.ensure_online()?;

        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.get(&id).map(|s| s.document.clone())))
    }

    async fn update_fields(&self, collection: &str, id: Uuid, fields: Fields) -> AppResult<()> {
        self.ensure_online()?;

        let mut entry = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Self::not_found(collection, id))?;
        let stored = entry
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(collection, id))?;

        merge(&mut stored.document, fields);
        debug!(
            "Updated document {} in {} to version {}",
            id, collection, stored.document.version
        );
        Ok(())
    }

    async fn update_if_version(
        &self,
        collection: &str,
        id: Uuid,
        expected_version: u64,
        fields: Fields,
    ) -> AppResult<bool> {
        self.ensure_online()?;

        let mut entry = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Self::not_found(collection, id))?;
        let stored = entry
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(collection, id))?;

        if stored.document.version != expected_version {
            debug!(
                "Version mismatch on {} in {}: expected {}, found {}",
                id, collection, expected_version, stored.document.version
            );
            return Ok(false);
        }

        merge(&mut stored.document, fields);
        Ok(true)
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> AppResult<()> {
        self.ensure_online()?;

        let removed = self
            .collections
            .get_mut(collection)
            .and_then(|mut c| c.remove(&id));
        match removed {
            Some(_) => Ok(()),
            None => Err(Self::not_found(collection, id)),
        }
    }

    async fn increment(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        delta: i64,
    ) -> AppResult<i64> {
        self.ensure_online()?;

        let mut entry = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Self::not_found(collection, id))?;
        let stored = entry
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(collection, id))?;

        let current = stored.document.integer_or_zero(field)?;
        let next = current + delta;
        let mut fields = Fields::new();
        fields.insert(field.to_string(), FieldValue::Integer(next));
        merge(&mut stored.document, fields);
        Ok(next)
    }

    async fn ping(&self) -> AppResult<()> {
        self.ensure_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("inventory", fields! { "name" => "Guitarra" })
            .await
            .unwrap();

        let doc = store.get_by_id("inventory", id).await.unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.version, 1);
        assert_eq!(doc.text("name").unwrap(), "Guitarra");

        assert!(store.get_by_id("inventory", Uuid::new_v4()).await.unwrap().is_none());
        assert!(store.get_by_id("loans", id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_keeps_insertion_order() {
        let store = InMemoryDocumentStore::new();
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            ids.push(store.insert_one("loans", fields! { "name" => name }).await.unwrap());
        }

        let listed: Vec<Uuid> = store
            .list_all("loans")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(listed, ids);
        assert!(store.list_all("empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_ordered_by_timestamp() {
        let store = InMemoryDocumentStore::new();
        for day in [3, 1, 2] {
            let at = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
            store
                .insert_one("loans", fields! { "loanDate" => at })
                .await
                .unwrap();
        }

        let days = |docs: Vec<Document>| -> Vec<u32> {
            use chrono::Datelike;
            docs.iter()
                .map(|d| d.timestamp("loanDate").unwrap().day())
                .collect()
        };

        let desc = store
            .list_ordered("loans", "loanDate", SortDirection::Descending)
            .await
            .unwrap();
        assert_eq!(days(desc), vec![3, 2, 1]);

        let asc = store
            .list_ordered("loans", "loanDate", SortDirection::Ascending)
            .await
            .unwrap();
        assert_eq!(days(asc), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_fields_merges_and_bumps_version() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("inventory", fields! { "name" => "Guitarra", "status" => "available" })
            .await
            .unwrap();

        store
            .update_fields("inventory", id, fields! { "status" => "loaned" })
            .await
            .unwrap();

        let doc = store.get_by_id("inventory", id).await.unwrap().unwrap();
        assert_eq!(doc.version, 2);
        assert_eq!(doc.text("status").unwrap(), "loaned");
        assert_eq!(doc.text("name").unwrap(), "Guitarra");

        let missing = store
            .update_fields("inventory", Uuid::new_v4(), fields! { "status" => "loaned" })
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_if_version_rejects_stale_writers() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("inventory", fields! { "status" => "available" })
            .await
            .unwrap();

        let first = store
            .update_if_version("inventory", id, 1, fields! { "status" => "loaned" })
            .await
            .unwrap();
        let second = store
            .update_if_version("inventory", id, 1, fields! { "status" => "loaned" })
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        let doc = store.get_by_id("inventory", id).await.unwrap().unwrap();
        assert_eq!(doc.version, 2);
    }

    #[tokio::test]
    async fn test_increment_and_delete() {
        let store = InMemoryDocumentStore::new();
        let id = store.insert_one("inventory", Fields::new()).await.unwrap();

        assert_eq!(store.increment("inventory", id, "loanCount", 1).await.unwrap(), 1);
        assert_eq!(store.increment("inventory", id, "loanCount", 2).await.unwrap(), 3);
        assert_eq!(store.increment("inventory", id, "loanCount", -1).await.unwrap(), 2);

        store.delete_by_id("inventory", id).await.unwrap();
        assert!(store.get_by_id("inventory", id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_by_id("inventory", id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_store_reports_unavailable() {
        let store = InMemoryDocumentStore::new();
        store.set_offline(true);

        assert!(matches!(store.ping().await, Err(AppError::StoreUnavailable(_))));
        assert!(matches!(
            store.list_all("inventory").await,
            Err(AppError::StoreUnavailable(_))
        ));

        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_preserves_order_and_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = InMemoryDocumentStore::new();
        let first = store.insert_one("loans", fields! { "n" => 1i64 }).await.unwrap();
        let second = store.insert_one("loans", fields! { "n" => 2i64 }).await.unwrap();
        store
            .update_fields("loans", first, fields! { "n" => 10i64 })
            .await
            .unwrap();
        store.save_snapshot(&path).unwrap();

        let restored = InMemoryDocumentStore::load_snapshot(&path).unwrap();
        let docs = restored.list_all("loans").await.unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(docs[0].version, 2);
        assert_eq!(docs[0].integer_or_zero("n").unwrap(), 10);

        // New inserts land after restored documents
        let third = restored.insert_one("loans", Fields::new()).await.unwrap();
        let ids: Vec<Uuid> = restored.list_all("loans").await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[test]
    fn test_missing_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = InMemoryDocumentStore::load_snapshot(&dir.path().join("absent.json")).unwrap();
        assert_eq!(store.document_count("inventory"), 0);
    }
}
