//! Common test utilities for z-commerce integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use z_commerce_service::{create_router, AppState, ServiceConfig};
use z_commerce_store::{Document, DocumentId, DocumentStore, MemoryStore, Result, StoreError};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for inspecting raw documents.
    pub store: Arc<dyn DocumentStore>,
}

impl TestHarness {
    /// Create a new test harness over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a test harness over `store`.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Create a record under `resource` and return its identifier.
    pub async fn create(&self, resource: &str, body: Value) -> String {
        let response = self
            .server
            .post(&format!("/v1/{resource}/new"))
            .json(&body)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["id"].as_str().expect("create returns an id").to_string()
    }

    /// Create the sample account.
    pub async fn create_account(&self) -> String {
        self.create("accounts", sample_account()).await
    }

    /// Create the sample catalog item.
    pub async fn create_item(&self) -> String {
        self.create("items", sample_item()).await
    }

    /// Number of raw documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.store.list(collection).await.expect("list").len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid account creation body.
pub fn sample_account() -> Value {
    json!({ "name": "Jane Smith Doe", "username": "jane_smith", "password": "Abcd1234" })
}

/// A valid catalog item creation body.
pub fn sample_item() -> Value {
    json!({ "name": "Wireless Mouse Pro", "price": 25.0, "stock": 10 })
}

/// A store whose every operation fails.
pub struct BrokenStore;

#[async_trait]
impl DocumentStore for BrokenStore {
    async fn list(&self, _: &str) -> Result<Vec<(DocumentId, Document)>> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn get(&self, _: &str, _: &DocumentId) -> Result<Option<Document>> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn add(&self, _: &str, _: Document) -> Result<DocumentId> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn update(&self, _: &str, _: &DocumentId, _: Document) -> Result<()> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn delete(&self, _: &str, _: &DocumentId) -> Result<()> {
        Err(StoreError::Database("connection refused".into()))
    }
}
