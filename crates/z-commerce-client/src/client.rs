//! z-commerce HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::types::{
    Account, CatalogItem, DocumentId, Envelope, NewAccount, NewCatalogItem, NewTransaction,
    Transaction,
};

const ACCOUNTS: &str = "accounts";
const ITEMS: &str = "items";
const TRANSACTIONS: &str = "transactions";

/// z-commerce API client.
#[derive(Debug, Clone)]
pub struct ZCommerceClient {
    client: Client,
    base_url: String,
}

impl ZCommerceClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the z-commerce service (e.g., `"http://z-commerce:8080"`)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// List every account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ClientError> {
        self.list(ACCOUNTS).await
    }

    /// Create an account and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WrongInput`] if the account is rejected.
    pub async fn create_account(&self, account: &NewAccount) -> Result<DocumentId, ClientError> {
        self.create(ACCOUNTS, account).await
    }

    /// Fetch one account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no account has this identifier.
    pub async fn get_account(&self, id: &DocumentId) -> Result<Account, ClientError> {
        self.find(ACCOUNTS, id).await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no account has this identifier.
    pub async fn delete_account(&self, id: &DocumentId) -> Result<(), ClientError> {
        self.remove(ACCOUNTS, id).await
    }

    /// List every catalog item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, ClientError> {
        self.list(ITEMS).await
    }

    /// Create a catalog item and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WrongInput`] if the item is rejected.
    pub async fn create_item(&self, item: &NewCatalogItem) -> Result<DocumentId, ClientError> {
        self.create(ITEMS, item).await
    }

    /// Fetch one catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no item has this identifier.
    pub async fn get_item(&self, id: &DocumentId) -> Result<CatalogItem, ClientError> {
        self.find(ITEMS, id).await
    }

    /// Delete a catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no item has this identifier.
    pub async fn delete_item(&self, id: &DocumentId) -> Result<(), ClientError> {
        self.remove(ITEMS, id).await
    }

    /// List every transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        self.list(TRANSACTIONS).await
    }

    /// Record a purchase and return the transaction identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WrongInput`] if the input is invalid or references
    /// an account or item that does not exist.
    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<DocumentId, ClientError> {
        self.create(TRANSACTIONS, transaction).await
    }

    /// Fetch one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no transaction has this identifier.
    pub async fn get_transaction(&self, id: &DocumentId) -> Result<Transaction, ClientError> {
        self.find(TRANSACTIONS, id).await
    }

    /// Cancel a transaction. Canceling twice succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown transaction and
    /// [`ClientError::Conflict`] if the transaction cannot be canceled.
    pub async fn cancel_transaction(&self, id: &DocumentId) -> Result<(), ClientError> {
        self.remove(TRANSACTIONS, id).await
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, ClientError> {
        let url = format!("{}/v1/{resource}/all", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    async fn create<B: Serialize>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<DocumentId, ClientError> {
        let url = format!("{}/v1/{resource}/new", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;

        let envelope: Envelope = self.handle_response(response).await?;
        envelope.id.ok_or_else(|| ClientError::Api {
            kind: envelope.kind,
            message: "create response carried no id".into(),
            status: StatusCode::CREATED.as_u16(),
        })
    }

    async fn find<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &DocumentId,
    ) -> Result<T, ClientError> {
        let url = format!("{}/v1/{resource}/find/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    async fn remove(&self, resource: &str, id: &DocumentId) -> Result<(), ClientError> {
        let url = format!("{}/v1/{resource}/delete/{id}", self.base_url);
        let response = self.client.delete(&url).send().await?;

        let envelope: Envelope = self.handle_response(response).await?;
        tracing::debug!(resource, id = %id, details = %envelope.details, "Record removed");

        Ok(())
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let error_body: Result<Envelope, _> = response.json().await;

        match error_body {
            Ok(envelope) => Err(classify(status, envelope)),
            Err(_) => Err(ClientError::Api {
                kind: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Map an error envelope to a typed error.
fn classify(status: StatusCode, envelope: Envelope) -> ClientError {
    let message = envelope.details;

    match envelope.kind.as_str() {
        "Wrong Input" => ClientError::WrongInput {
            message,
            status: status.as_u16(),
        },
        "Bad URL" => ClientError::BadUrl(message),
        "Not found" => ClientError::NotFound(message),
        "Conflict" => ClientError::Conflict(message),
        "Bad response" => ClientError::Server(message),
        _ => ClientError::Api {
            kind: envelope.kind,
            message,
            status: status.as_u16(),
        },
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(kind: &str) -> Envelope {
        Envelope {
            kind: kind.to_string(),
            details: "details".to_string(),
            id: None,
        }
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ZCommerceClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn envelope_kinds_map_to_errors() {
        assert!(matches!(
            classify(StatusCode::UNPROCESSABLE_ENTITY, envelope("Wrong Input")),
            ClientError::WrongInput { status: 422, .. }
        ));
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, envelope("Bad URL")),
            ClientError::BadUrl(_)
        ));
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, envelope("Not found")),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            classify(StatusCode::CONFLICT, envelope("Conflict")),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, envelope("Bad response")),
            ClientError::Server(_)
        ));
        assert!(matches!(
            classify(StatusCode::IM_A_TEAPOT, envelope("Teapot")),
            ClientError::Api { status: 418, .. }
        ));
    }
}
