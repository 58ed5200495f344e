//! Document storage layer for z-commerce.
//!
//! Records are kept as schema-less JSON documents grouped into named
//! collections. Each document is addressed by a [`DocumentId`] that the store
//! generates on insert. The store enforces nothing about document contents or
//! cross-document references; validation happens above this layer.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local, always available. Used for tests and for
//!   running the service without a data directory.
//! - `RocksStore` (feature `rocksdb-backend`): one column family per
//!   collection, values encoded as CBOR.
//!
//! # Example
//!
//! ```
//! use z_commerce_store::{Document, DocumentStore, MemoryStore};
//!
//! # async fn example() -> z_commerce_store::Result<()> {
//! let store = MemoryStore::new();
//!
//! let mut doc = Document::new();
//! doc.insert("name".into(), "Wireless Mouse Pro".into());
//! let id = store.add("catalog_items", doc).await?;
//!
//! let fetched = store.get("catalog_items", &id).await?;
//! assert!(fetched.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

use async_trait::async_trait;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;
pub use z_commerce_core::DocumentId;

/// A stored document: a JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// The storage trait defining all document operations.
///
/// Operations on different documents are independent. Operations on the same
/// document are not ordered by this layer; the last write wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Document)>>;

    /// Fetch one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>>;

    /// Write a new document and return its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn add(&self, collection: &str, document: Document) -> Result<DocumentId>;

    /// Overwrite the given top-level fields of an existing document.
    ///
    /// Fields not named in `fields` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document doesn't exist.
    async fn update(&self, collection: &str, id: &DocumentId, fields: Document) -> Result<()>;

    /// Remove a document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document doesn't exist.
    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()>;
}
