//! Error types for z-commerce storage.

use z_commerce_core::DocumentId;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The addressed document does not exist.
    #[error("{collection} document not found: {id}")]
    NotFound {
        /// Collection that was searched.
        collection: String,
        /// The missing document.
        id: DocumentId,
    },
}

impl StoreError {
    /// Build a `NotFound` error for `id` in `collection`.
    #[must_use]
    pub fn not_found(collection: &str, id: &DocumentId) -> Self {
        Self::NotFound {
            collection: collection.to_owned(),
            id: id.clone(),
        }
    }
}
