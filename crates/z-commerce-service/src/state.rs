//! Application state.

use std::sync::Arc;

use z_commerce_core::Argon2PasswordHasher;
use z_commerce_store::DocumentStore;

use crate::config::ServiceConfig;
use crate::controllers::{AccountController, CatalogController, TransactionController};

/// Controllers and configuration shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account controller.
    pub accounts: Arc<AccountController>,

    /// Catalog item controller.
    pub catalog: Arc<CatalogController>,

    /// Transaction controller.
    pub transactions: Arc<TransactionController>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Wire every controller to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: ServiceConfig) -> Self {
        let accounts = Arc::new(AccountController::new(
            Arc::clone(&store),
            Arc::new(Argon2PasswordHasher::default()),
        ));
        let catalog = Arc::new(CatalogController::new(Arc::clone(&store)));
        let transactions = Arc::new(TransactionController::new(
            store,
            Arc::clone(&accounts) as _,
            Arc::clone(&catalog) as _,
        ));

        Self {
            accounts,
            catalog,
            transactions,
            config,
        }
    }
}
