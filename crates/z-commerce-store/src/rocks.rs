//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `DocumentStore`
//! trait. Each collection lives in its own column family; keys are document
//! identifiers and values are CBOR-encoded documents. `RocksDB` calls block, so
//! every operation runs on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};

use crate::error::{Result, StoreError};
use crate::schema::all_collections;
use crate::{Document, DocumentId, DocumentStore};

type Db = DBWithThreadMode<MultiThreaded>;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<Db>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_collections()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = Db::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Run `op` against the database on the blocking thread pool.
    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Db) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| StoreError::Database(format!("blocking task failed: {e}")))?
    }
}

/// Get a column family handle.
fn cf<'a>(db: &'a Db, name: &str) -> Result<Arc<BoundColumnFamily<'a>>> {
    db.cf_handle(name)
        .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
}

/// Serialize a document using CBOR.
fn serialize(document: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(document, &mut buf)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Deserialize a document from CBOR.
fn deserialize(data: &[u8]) -> Result<Document> {
    ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn read(db: &Db, collection: &str, id: &DocumentId) -> Result<Option<Document>> {
    let handle = cf(db, collection)?;
    db.get_cf(&handle, id)
        .map_err(|e| StoreError::Database(e.to_string()))?
        .map(|data| deserialize(&data))
        .transpose()
}

fn write(db: &Db, collection: &str, id: &DocumentId, document: &Document) -> Result<()> {
    let handle = cf(db, collection)?;
    let value = serialize(document)?;
    db.put_cf(&handle, id, value)
        .map_err(|e| StoreError::Database(e.to_string()))
}

#[async_trait]
impl DocumentStore for RocksStore {
    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Document)>> {
        let collection = collection.to_owned();
        self.blocking(move |db| {
            let handle = cf(db, &collection)?;
            let mut documents = Vec::new();

            for item in db.iterator_cf(&handle, IteratorMode::Start) {
                let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

                let id = std::str::from_utf8(&key)
                    .ok()
                    .and_then(|raw| DocumentId::parse(raw).ok());
                let Some(id) = id else {
                    tracing::warn!(collection = %collection, "Skipping document with unreadable key");
                    continue;
                };

                match deserialize(&value) {
                    Ok(document) => documents.push((id, document)),
                    Err(e) => {
                        tracing::warn!(
                            collection = %collection,
                            id = %id,
                            error = %e,
                            "Skipping undecodable document"
                        );
                    }
                }
            }

            Ok(documents)
        })
        .await
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>> {
        let collection = collection.to_owned();
        let id = id.clone();
        self.blocking(move |db| read(db, &collection, &id)).await
    }

    async fn add(&self, collection: &str, document: Document) -> Result<DocumentId> {
        let collection = collection.to_owned();
        self.blocking(move |db| {
            let id = DocumentId::generate();
            write(db, &collection, &id, &document)?;
            Ok(id)
        })
        .await
    }

    async fn update(&self, collection: &str, id: &DocumentId, fields: Document) -> Result<()> {
        let collection = collection.to_owned();
        let id = id.clone();
        self.blocking(move |db| {
            let mut document =
                read(db, &collection, &id)?.ok_or_else(|| StoreError::not_found(&collection, &id))?;
            document.extend(fields);
            write(db, &collection, &id, &document)
        })
        .await
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()> {
        let collection = collection.to_owned();
        let id = id.clone();
        self.blocking(move |db| {
            // Check if document exists
            if read(db, &collection, &id)?.is_none() {
                return Err(StoreError::not_found(&collection, &id));
            }

            let handle = cf(db, &collection)?;
            db.delete_cf(&handle, &id)
                .map_err(|e| StoreError::Database(e.to_string()))
        })
        .await
    }
}
