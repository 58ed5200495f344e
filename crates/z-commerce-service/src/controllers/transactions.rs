//! Transaction controller.
//!
//! Transactions reference an account and a catalog item. References are
//! checked once, when the transaction is built from caller input; nothing
//! prevents the referenced records from being deleted afterwards, so views
//! tolerate dangling references.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use z_commerce_core::transaction::{self, TransactionInput};
use z_commerce_core::{
    validate_into, Account, Cancellation, CatalogItem, DocumentId, Identified, ResultAsyncExt,
    Transaction, TransactionState, ValidationError, TRANSACTIONS_COLLECTION,
};
use z_commerce_store::{Document, DocumentStore, StoreError};

use super::{into_value, Controller, ControllerError, RecordLookup};

/// A referenced record as shown in a transaction view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    /// Identifier of the referenced record.
    pub id: DocumentId,
    /// Display name, or `None` when the record no longer exists.
    pub name: Option<String>,
}

/// Purchase time split for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseTime {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// UTC wall-clock time, `HH:MM:SS`.
    pub time: String,
}

impl From<DateTime<Utc>> for PurchaseTime {
    fn from(at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.timestamp_millis(),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M:%S").to_string(),
        }
    }
}

/// Transaction view returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// Transaction identifier.
    pub id: DocumentId,
    /// Purchasing account.
    pub user: EntityRef,
    /// Purchased catalog item.
    pub product: EntityRef,
    /// Quantity purchased.
    pub amount_of_product: u32,
    /// When the transaction was created.
    pub purchase_time: PurchaseTime,
    /// Lifecycle state.
    pub state: TransactionState,
    /// Quantity times the item's current price, or `None` when the item no
    /// longer exists.
    pub amount_of_sale: Option<f64>,
}

/// Controller for the `transactions` collection.
pub struct TransactionController {
    store: Arc<dyn DocumentStore>,
    accounts: Arc<dyn RecordLookup<Account>>,
    items: Arc<dyn RecordLookup<CatalogItem>>,
}

impl TransactionController {
    /// Create a controller over `store`, resolving references through
    /// `accounts` and `items`.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        accounts: Arc<dyn RecordLookup<Account>>,
        items: Arc<dyn RecordLookup<CatalogItem>>,
    ) -> Self {
        Self {
            store,
            accounts,
            items,
        }
    }

    /// Fail unless both referenced records exist. The account is reported
    /// first when both are missing.
    async fn ensure_references(
        &self,
        input: TransactionInput,
    ) -> Result<TransactionInput, ControllerError> {
        let (account, item) = tokio::try_join!(
            self.accounts.lookup(&input.user),
            self.items.lookup(&input.product),
        )?;

        if account.is_none() {
            return Err(ControllerError::MissingReference(
                "the specified account does not exist".into(),
            ));
        }
        if item.is_none() {
            return Err(ControllerError::MissingReference(
                "the specified catalog item does not exist".into(),
            ));
        }

        Ok(input)
    }
}

#[async_trait]
impl Controller for TransactionController {
    type Draft = Transaction;
    type Payload = Transaction;
    type Data = TransactionView;

    fn collection(&self) -> &'static str {
        TRANSACTIONS_COLLECTION
    }

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn build_from_input(&self, input: Value) -> Result<Transaction, ControllerError> {
        validate_into::<TransactionInput>(input, transaction::input_schema())
            .map_err(ControllerError::from)
            .then_async(|input| self.ensure_references(input))
            .await
            .map(|input| Transaction::open(input, Utc::now()))
    }

    fn build_from_payload(
        &self,
        payload: Document,
        id: DocumentId,
    ) -> Result<Identified<Transaction>, ValidationError> {
        validate_into(into_value(payload), transaction::payload_schema())
            .map(|tx| Identified::new(id, tx))
    }

    fn convert_to_payload(&self, record: &Transaction) -> Transaction {
        record.clone()
    }

    async fn convert_to_data(
        &self,
        record: Identified<Transaction>,
    ) -> Result<TransactionView, StoreError> {
        let Identified { id, record: tx } = record;

        let (account, item) = tokio::try_join!(
            self.accounts.lookup(&tx.user),
            self.items.lookup(&tx.product),
        )?;

        let account = account.map(|a| a.record);
        let item = item.map(|i| i.record);

        Ok(TransactionView {
            id,
            user: EntityRef {
                id: tx.user,
                name: account.map(|a| a.name),
            },
            amount_of_sale: item
                .as_ref()
                .map(|i| f64::from(tx.amount_of_product) * i.price),
            product: EntityRef {
                id: tx.product,
                name: item.map(|i| i.name),
            },
            amount_of_product: tx.amount_of_product,
            purchase_time: PurchaseTime::from(tx.date),
            state: tx.state,
        })
    }

    /// Cancel a transaction. The record is kept with state `canceled`.
    async fn delete(&self, id: &DocumentId) -> Result<String, ControllerError> {
        let record = self
            .find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(self.collection(), id))?;

        match record.record.state.cancel()? {
            Cancellation::Canceled => {
                let mut fields = Document::new();
                fields.insert("state".into(), TransactionState::Canceled.as_str().into());
                self.store.update(self.collection(), id, fields).await?;
                tracing::info!(collection = self.collection(), id = %id, "Transaction canceled");
            }
            Cancellation::AlreadyCanceled => {
                tracing::debug!(id = %id, "Transaction already canceled");
            }
        }

        Ok("the transaction was canceled successfully".into())
    }
}
