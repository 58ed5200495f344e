//! Request and response types for the z-commerce client.

use serde::{Deserialize, Serialize};

pub use z_commerce_core::{DocumentId, TransactionState};

/// Account creation request.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    /// Display name, title-cased, 8 to 32 characters.
    pub name: String,
    /// Login name, 4 to 20 letters or underscores.
    pub username: String,
    /// Plain-text password, 8 to 64 characters with a digit, an uppercase
    /// and a lowercase letter.
    pub password: String,
}

/// Catalog item creation request.
#[derive(Debug, Clone, Serialize)]
pub struct NewCatalogItem {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
}

/// Transaction creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Purchasing account.
    pub user: DocumentId,
    /// Purchased catalog item.
    pub product: DocumentId,
    /// Quantity purchased.
    pub amount_of_product: u32,
}

/// An account as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Account identifier.
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
}

/// A catalog item as returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    /// Item identifier.
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
}

/// A record referenced by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    /// Referenced identifier.
    pub id: DocumentId,
    /// Display name, absent when the record has since been deleted.
    pub name: Option<String>,
}

/// When a transaction was created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PurchaseTime {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// UTC date, `YYYY-MM-DD`.
    pub date: String,
    /// UTC time, `HH:MM:SS`.
    pub time: String,
}

/// A transaction as returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier.
    pub id: DocumentId,
    /// Purchasing account.
    pub user: EntityRef,
    /// Purchased catalog item.
    pub product: EntityRef,
    /// Quantity purchased.
    pub amount_of_product: u32,
    /// Creation time.
    pub purchase_time: PurchaseTime,
    /// Lifecycle state.
    pub state: TransactionState,
    /// Quantity times the current unit price; absent when the item was
    /// deleted.
    pub amount_of_sale: Option<f64>,
}

/// Response envelope for writes and errors.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Outcome category, such as `Success` or `Wrong Input`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description.
    pub details: String,
    /// Identifier of a newly created record.
    #[serde(default)]
    pub id: Option<DocumentId>,
}
