//! Core types and utilities for z-commerce.
//!
//! This crate provides the foundational types shared by the store, the service
//! and the client:
//!
//! - **Identifiers**: `DocumentId`, `Identified`
//! - **Validation**: `Schema`, `RuleChain`, `validate_object`
//! - **Chaining**: `ResultAsyncExt` for fallible async pipelines
//! - **Records**: `Account`, `CatalogItem`, `Transaction`
//! - **Passwords**: `PasswordHasher`, `Argon2PasswordHasher`
//!
//! # Record shapes
//!
//! Every resource moves through up to four shapes: the untrusted input a caller
//! sends, the validated internal record, the payload written to the store, and
//! the view returned to callers. The internal record gains its identifier only
//! once the store has assigned one, at which point it is wrapped in
//! [`Identified`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod catalog;
pub mod ids;
pub mod outcome;
pub mod password;
pub mod transaction;
pub mod validation;

use serde::Serialize;

pub use account::{Account, AccountInput, AccountPayload, ACCOUNTS_COLLECTION};
pub use catalog::{CatalogItem, CATALOG_COLLECTION};
pub use ids::{DocumentId, IdError};
pub use outcome::ResultAsyncExt;
pub use password::{Argon2PasswordHasher, PasswordDigest, PasswordError, PasswordHasher};
pub use transaction::{
    Cancellation, Transaction, TransactionInput, TransactionState, TransitionError,
    TRANSACTIONS_COLLECTION,
};
pub use validation::{validate_into, validate_object, Rule, RuleChain, Schema, ValidationError};

/// An internal record together with its store-assigned identifier.
///
/// This is the only record shape held across operation boundaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identified<T> {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// The validated record.
    #[serde(flatten)]
    pub record: T,
}

impl<T> Identified<T> {
    /// Attach an identifier to a record.
    #[must_use]
    pub const fn new(id: DocumentId, record: T) -> Self {
        Self { id, record }
    }
}
