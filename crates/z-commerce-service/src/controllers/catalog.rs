//! Catalog item controller.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use z_commerce_core::catalog::{self, CatalogItem};
use z_commerce_core::{validate_into, DocumentId, Identified, ValidationError, CATALOG_COLLECTION};
use z_commerce_store::{Document, DocumentStore, StoreError};

use super::{into_value, Controller, ControllerError};

/// Controller for the `catalog_items` collection.
pub struct CatalogController {
    store: Arc<dyn DocumentStore>,
}

impl CatalogController {
    /// Create a controller over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Controller for CatalogController {
    type Draft = CatalogItem;
    type Payload = CatalogItem;
    type Data = Identified<CatalogItem>;

    fn collection(&self) -> &'static str {
        CATALOG_COLLECTION
    }

    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn build_from_input(&self, input: Value) -> Result<CatalogItem, ControllerError> {
        Ok(validate_into(input, catalog::schema())?)
    }

    fn build_from_payload(
        &self,
        payload: Document,
        id: DocumentId,
    ) -> Result<Identified<CatalogItem>, ValidationError> {
        validate_into(into_value(payload), catalog::schema()).map(|item| Identified::new(id, item))
    }

    fn convert_to_payload(&self, record: &CatalogItem) -> CatalogItem {
        record.clone()
    }

    async fn convert_to_data(
        &self,
        record: Identified<CatalogItem>,
    ) -> Result<Identified<CatalogItem>, StoreError> {
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use z_commerce_store::MemoryStore;

    fn mouse() -> Value {
        json!({ "name": "Wireless Mouse Pro", "price": 25.0, "stock": 10 })
    }

    #[tokio::test]
    async fn negative_price_writes_nothing() {
        let controller = CatalogController::new(Arc::new(MemoryStore::new()));
        let mut input = mouse();
        input["price"] = json!(-5);

        let err = controller.build_from_input(input).await.unwrap_err();
        assert_eq!(err.to_string(), "price must be greater than zero");
        assert!(controller.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn view_is_flat_with_id() {
        let controller = CatalogController::new(Arc::new(MemoryStore::new()));
        let item = controller.build_from_input(mouse()).await.unwrap();
        let inserted = controller.insert(&item).await.unwrap();

        let found = controller.find(&inserted.id).await.unwrap().unwrap();
        let view = serde_json::to_value(controller.convert_to_data(found).await.unwrap()).unwrap();

        assert_eq!(
            view,
            json!({
                "id": inserted.id.to_string(),
                "name": "Wireless Mouse Pro",
                "price": 25.0,
                "stock": 10
            })
        );
    }

    #[tokio::test]
    async fn get_all_returns_every_valid_item() {
        let controller = CatalogController::new(Arc::new(MemoryStore::new()));
        for name in ["Wireless Mouse Pro", "Mechanical Keyboard"] {
            let mut input = mouse();
            input["name"] = json!(name);
            let item = controller.build_from_input(input).await.unwrap();
            controller.insert(&item).await.unwrap();
        }

        let mut names: Vec<_> = controller
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.record.name)
            .collect();
        names.sort();
        assert_eq!(names, ["Mechanical Keyboard", "Wireless Mouse Pro"]);
    }
}
