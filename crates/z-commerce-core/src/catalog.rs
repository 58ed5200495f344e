//! Catalog item records.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::validation::{RuleChain, Schema};

/// Store collection holding catalog items.
pub const CATALOG_COLLECTION: &str = "catalog_items";

/// A catalog item. Input, internal and stored shapes are identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
}

/// Rules applied to both caller input and stored documents.
#[must_use]
pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .field(
                "name",
                RuleChain::new()
                    .required("name must be present")
                    .is_string("name must be text")
                    .max_length(32, "name must be at most 32 characters long")
                    .min_length(8, "name must be at least 8 characters long")
                    .title_case("name must be title-cased"),
            )
            .field(
                "price",
                RuleChain::new()
                    .required("price must be present")
                    .is_number("price must be a number")
                    .is_greater_than_zero("price must be greater than zero"),
            )
            .field(
                "stock",
                RuleChain::new()
                    .required("stock must be present")
                    .is_number("stock must be a number")
                    .is_integer("stock must be a whole number")
                    .is_greater_than_zero("stock must be greater than zero"),
            )
    })
}
