//! Collection names known to persistent backends.
//!
//! `RocksDB` maps each collection to one column family, which must exist when
//! the database is opened.

use z_commerce_core::{ACCOUNTS_COLLECTION, CATALOG_COLLECTION, TRANSACTIONS_COLLECTION};

/// Returns all collection names for database initialization.
#[must_use]
pub fn all_collections() -> Vec<&'static str> {
    vec![
        ACCOUNTS_COLLECTION,
        CATALOG_COLLECTION,
        TRANSACTIONS_COLLECTION,
    ]
}
