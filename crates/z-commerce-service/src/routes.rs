//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::Controller;
use crate::handlers::{health, resource};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
///
/// Under each of `/v1/accounts`, `/v1/items` and `/v1/transactions`:
///
/// - `GET /all` - List records
/// - `POST /new` - Create a record
/// - `GET /find/:id` - Fetch a record
/// - `DELETE /delete/:id` - Delete a record (transactions are canceled)
///
/// `/find` and `/delete` without an identifier answer `Bad URL`.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let api_routes = Router::new()
        .nest("/accounts", resource_routes(state.accounts))
        .nest("/items", resource_routes(state.catalog))
        .nest("/transactions", resource_routes(state.transactions))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
}

/// The four record routes for one controller.
fn resource_routes<C: Controller>(controller: Arc<C>) -> Router {
    Router::new()
        .route("/all", get(resource::list::<C>))
        .route("/new", post(resource::create::<C>))
        .route("/find", get(resource::missing_id))
        .route("/find/", get(resource::missing_id))
        .route("/find/:id", get(resource::find::<C>))
        .route("/delete", delete(resource::missing_id))
        .route("/delete/", delete(resource::missing_id))
        .route("/delete/:id", delete(resource::remove::<C>))
        .with_state(controller)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
