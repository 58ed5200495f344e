//! z-commerce HTTP API service.
//!
//! Serves three resources over JSON:
//!
//! - Accounts (`/v1/accounts`)
//! - Catalog items (`/v1/items`)
//! - Transactions (`/v1/transactions`), which reference an account and an item
//!
//! Each resource is backed by a [`controllers::Controller`] over a shared
//! [`z_commerce_store::DocumentStore`]. Handlers are generic over the
//! controller, so every resource exposes the same routes and error envelope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers must be async to be routable

pub mod config;
pub mod controllers;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use controllers::{Controller, ControllerError};
pub use error::{ApiError, Envelope};
pub use routes::create_router;
pub use state::AppState;
