//! Resource controllers.
//!
//! A [`Controller`] owns one collection in the document store and knows how to
//! move a record between its shapes:
//!
//! ```text
//!   input (JSON) ──build_from_input──► Draft ──convert_to_payload──► Payload ──► store
//!   store ──► Document + id ──build_from_payload──► Identified<Draft> ──convert_to_data──► Data
//! ```
//!
//! Concrete resources supply the four hooks; `get_all`, `insert`, `find` and
//! `delete` are written once here. Validation failures are returned before any
//! write. Records read back from the store are validated again, and a record
//! that fails there is treated as absent rather than as a caller error.

pub mod accounts;
pub mod catalog;
pub mod transactions;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use z_commerce_core::{DocumentId, Identified, PasswordError, TransitionError, ValidationError};
use z_commerce_store::{Document, DocumentStore, StoreError};

pub use accounts::{AccountController, AccountView};
pub use catalog::CatalogController;
pub use transactions::{EntityRef, PurchaseTime, TransactionController, TransactionView};

/// Errors produced by controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Input failed schema validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Input referenced a record that does not exist.
    #[error("{0}")]
    MissingReference(String),

    /// The requested state change is not allowed.
    #[error(transparent)]
    Conflict(#[from] TransitionError),

    /// The store rejected the operation.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A password could not be hashed.
    #[error(transparent)]
    Hashing(#[from] PasswordError),
}

/// Result of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    /// Identifier assigned by the store.
    pub id: DocumentId,
    /// Human-readable confirmation.
    pub message: String,
}

/// Data access for one resource.
#[async_trait]
pub trait Controller: Send + Sync + 'static {
    /// Validated record before the store has assigned an identifier.
    type Draft: Send + Sync + 'static;
    /// Shape written to the store.
    type Payload: Serialize + Send;
    /// Shape returned to callers.
    type Data: Serialize + Send + 'static;

    /// Collection this controller reads and writes.
    fn collection(&self) -> &'static str;

    /// Store handle.
    fn store(&self) -> &Arc<dyn DocumentStore>;

    /// Validate and normalize untrusted input.
    async fn build_from_input(&self, input: Value) -> Result<Self::Draft, ControllerError>;

    /// Validate a stored document and attach its identifier.
    fn build_from_payload(
        &self,
        payload: Document,
        id: DocumentId,
    ) -> Result<Identified<Self::Draft>, ValidationError>;

    /// Project a record onto its stored shape.
    fn convert_to_payload(&self, record: &Self::Draft) -> Self::Payload;

    /// Render a record for callers.
    async fn convert_to_data(&self, record: Identified<Self::Draft>) -> Result<Self::Data, StoreError>;

    /// Every stored record that passes validation.
    ///
    /// Records that fail rehydration are logged and left out. Order is
    /// unspecified.
    async fn get_all(&self) -> Result<Vec<Identified<Self::Draft>>, StoreError> {
        let documents = self.store().list(self.collection()).await?;
        let total = documents.len();

        let records: Vec<_> = documents
            .into_iter()
            .filter_map(|(id, document)| {
                self.build_from_payload(document, id.clone())
                    .map_err(|e| {
                        tracing::debug!(
                            collection = self.collection(),
                            id = %id,
                            error = %e,
                            "Skipping invalid stored record"
                        );
                    })
                    .ok()
            })
            .collect();

        if records.len() < total {
            tracing::warn!(
                collection = self.collection(),
                skipped = total - records.len(),
                "Some stored records failed validation"
            );
        }

        Ok(records)
    }

    /// Write a new record.
    async fn insert(&self, record: &Self::Draft) -> Result<Inserted, StoreError> {
        let document = to_document(&self.convert_to_payload(record))?;
        let id = self.store().add(self.collection(), document).await?;

        tracing::info!(collection = self.collection(), id = %id, "Record inserted");

        Ok(Inserted {
            id,
            message: "the record was inserted successfully".into(),
        })
    }

    /// Look up a record by identifier.
    ///
    /// A missing document and a document that fails validation both yield
    /// `None`.
    async fn find(&self, id: &DocumentId) -> Result<Option<Identified<Self::Draft>>, StoreError> {
        let Some(document) = self.store().get(self.collection(), id).await? else {
            return Ok(None);
        };

        match self.build_from_payload(document, id.clone()) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(
                    collection = self.collection(),
                    id = %id,
                    error = %e,
                    "Stored record failed validation"
                );
                Ok(None)
            }
        }
    }

    /// Remove a record.
    async fn delete(&self, id: &DocumentId) -> Result<String, ControllerError> {
        self.store().delete(self.collection(), id).await?;

        tracing::info!(collection = self.collection(), id = %id, "Record deleted");

        Ok("the record was deleted successfully".into())
    }
}

/// Find-by-identifier for records owned by another resource.
///
/// Controllers that join across resources depend on this rather than on a
/// concrete controller, so collaborators can be swapped in tests.
#[async_trait]
pub trait RecordLookup<T>: Send + Sync {
    /// Look up a record by identifier.
    async fn lookup(&self, id: &DocumentId) -> Result<Option<Identified<T>>, StoreError>;
}

#[async_trait]
impl<C: Controller> RecordLookup<C::Draft> for C {
    async fn lookup(&self, id: &DocumentId) -> Result<Option<Identified<C::Draft>>, StoreError> {
        self.find(id).await
    }
}

/// Encode a payload as a store document.
fn to_document<T: Serialize>(payload: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(StoreError::Serialization(format!(
            "payload must encode to an object, got {other}"
        ))),
        Err(e) => Err(StoreError::Serialization(e.to_string())),
    }
}

/// Wrap a stored document back into a JSON value for validation.
fn into_value(document: Document) -> Value {
    Value::Object(document)
}
