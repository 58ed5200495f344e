//! In-memory storage implementation.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::{Document, DocumentId, DocumentStore};

type Collection = BTreeMap<DocumentId, Document>;

/// Process-local document store.
///
/// Collections are created on first write. Contents are lost when the store is
/// dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Document)>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn add(&self, collection: &str, document: Document) -> Result<DocumentId> {
        let id = DocumentId::generate();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), document);

        tracing::trace!(collection, id = %id, "Document added");
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &DocumentId, fields: Document) -> Result<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        doc.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()> {
        self.collections
            .write()
            .await
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn add_then_get() {
        let store = MemoryStore::new();
        let id = store.add("items", doc(json!({ "name": "Desk" }))).await.unwrap();

        let fetched = store.get("items", &id).await.unwrap().unwrap();
        assert_eq!(fetched["name"], "Desk");
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = MemoryStore::new();
        let id = DocumentId::generate();
        assert!(store.get("items", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_scoped_to_collection() {
        let store = MemoryStore::new();
        store.add("a", doc(json!({ "n": 1 }))).await.unwrap();
        store.add("a", doc(json!({ "n": 2 }))).await.unwrap();
        store.add("b", doc(json!({ "n": 3 }))).await.unwrap();

        assert_eq!(store.list("a").await.unwrap().len(), 2);
        assert_eq!(store.list("b").await.unwrap().len(), 1);
        assert!(store.list("c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .add("tx", doc(json!({ "state": "active", "amount": 2 })))
            .await
            .unwrap();

        store
            .update("tx", &id, doc(json!({ "state": "canceled" })))
            .await
            .unwrap();

        let fetched = store.get("tx", &id).await.unwrap().unwrap();
        assert_eq!(fetched["state"], "canceled");
        assert_eq!(fetched["amount"], 2);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("tx", &DocumentId::generate(), Document::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_fails() {
        let store = MemoryStore::new();
        let id = store.add("items", Document::new()).await.unwrap();

        store.delete("items", &id).await.unwrap();
        assert!(store.get("items", &id).await.unwrap().is_none());

        let err = store.delete("items", &id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
