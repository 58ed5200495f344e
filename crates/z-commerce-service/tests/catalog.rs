//! Catalog item integration tests.

mod common;

use common::{sample_item, TestHarness};
use serde_json::{json, Value};

#[tokio::test]
async fn create_and_find_item() {
    let harness = TestHarness::new();
    let id = harness.create_item().await;

    let response = harness.server.get(&format!("/v1/items/find/{id}")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "id": id, "name": "Wireless Mouse Pro", "price": 25.0, "stock": 10 })
    );
}

#[tokio::test]
async fn negative_price_is_rejected_without_write() {
    let harness = TestHarness::new();
    let mut input = sample_item();
    input["price"] = json!(-5);

    let response = harness.server.post("/v1/items/new").json(&input).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["type"], "Wrong Input");
    assert_eq!(body["details"], "price must be greater than zero");
    assert_eq!(harness.count("catalog_items").await, 0);
}

#[tokio::test]
async fn fractional_stock_is_rejected() {
    let harness = TestHarness::new();
    let mut input = sample_item();
    input["stock"] = json!(2.5);

    let response = harness.server.post("/v1/items/new").json(&input).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn missing_field_reports_first_failure() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/items/new")
        .json(&json!({ "name": "Wireless Mouse Pro" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["details"], "price must be present");
}

#[tokio::test]
async fn corrupt_documents_are_left_out_of_listing() {
    let harness = TestHarness::new();
    harness.create_item().await;
    let corrupt = json!({ "name": "Broken Item Entry", "price": "free", "stock": 1 });
    let corrupt_id = harness
        .store
        .add("catalog_items", corrupt.as_object().cloned().unwrap())
        .await
        .unwrap();

    let body: Vec<Value> = harness.server.get("/v1/items/all").await.json();
    assert_eq!(body.len(), 1);

    harness
        .server
        .get(&format!("/v1/items/find/{corrupt_id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn delete_item() {
    let harness = TestHarness::new();
    let id = harness.create_item().await;

    let response = harness.server.delete(&format!("/v1/items/delete/{id}")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["details"], "the record was deleted successfully");
    assert_eq!(harness.count("catalog_items").await, 0);
}
