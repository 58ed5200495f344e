//! Account controller.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use z_commerce_core::account::{self, Account, AccountInput, AccountPayload};
use z_commerce_core::{
    validate_into, DocumentId, Identified, PasswordHasher, ValidationError, ACCOUNTS_COLLECTION,
};
use z_commerce_store::{Document, DocumentStore, StoreError};

use super::{into_value, Controller, ControllerError};

/// Account view returned to callers. Password material is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    /// Account identifier.
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
}

/// Controller for the `accounts` collection.
pub struct AccountController {
    store: Arc<dyn DocumentStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountController {
    /// Create a controller over `store`, hashing passwords with `hasher`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl Controller for AccountController {
    type Draft = Account;
    type Payload = AccountPayload;
    type Data = AccountView;

    fn collection(&self) -> &'static str {
        ACCOUNTS_COLLECTION
    }

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn build_from_input(&self, input: Value) -> Result<Account, ControllerError> {
        let input: AccountInput = validate_into(input, account::input_schema())?;

        Ok(Account {
            name: input.name,
            username: input.username,
            password: self.hasher.hash(&input.password)?,
        })
    }

    fn build_from_payload(
        &self,
        payload: Document,
        id: DocumentId,
    ) -> Result<Identified<Account>, ValidationError> {
        let payload: AccountPayload = validate_into(into_value(payload), account::payload_schema())?;
        Ok(Identified::new(id, Account::from(payload)))
    }

    fn convert_to_payload(&self, record: &Account) -> AccountPayload {
        AccountPayload::from(record)
    }

    async fn convert_to_data(&self, record: Identified<Account>) -> Result<AccountView, StoreError> {
        Ok(AccountView {
            id: record.id,
            name: record.record.name,
            username: record.record.username,
        })
    }
}
