//! Resource handlers.
//!
//! One set of handlers serves every resource; the controller type parameter
//! selects the collection and the record shapes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures::future::try_join_all;
use serde_json::Value;

use z_commerce_core::{DocumentId, IdError};

use crate::controllers::Controller;
use crate::error::{ApiError, Envelope};

/// List every valid record.
pub async fn list<C: Controller>(
    State(controller): State<Arc<C>>,
) -> Result<Json<Vec<C::Data>>, ApiError> {
    let records = controller.get_all().await?;
    let views = try_join_all(
        records
            .into_iter()
            .map(|record| controller.convert_to_data(record)),
    )
    .await?;

    Ok(Json(views))
}

/// Validate and store a new record.
pub async fn create<C: Controller>(
    State(controller): State<Arc<C>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>), ApiError> {
    let Json(input) = body.map_err(|e| ApiError::WrongInput(e.body_text()))?;

    let record = controller.build_from_input(input).await?;
    let inserted = controller.insert(&record).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(inserted.message).with_id(inserted.id)),
    ))
}

/// Fetch one record.
pub async fn find<C: Controller>(
    State(controller): State<Arc<C>>,
    Path(id): Path<String>,
) -> Result<Json<C::Data>, ApiError> {
    let id = parse_id(&id)?;
    let record = controller
        .find(&id)
        .await?
        .ok_or_else(ApiError::record_not_found)?;

    Ok(Json(controller.convert_to_data(record).await?))
}

/// Delete one record, or cancel it for resources that keep history.
pub async fn remove<C: Controller>(
    State(controller): State<Arc<C>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let id = parse_id(&id)?;
    let message = controller.delete(&id).await?;

    Ok(Json(Envelope::success(message)))
}

/// Answer requests whose identifier segment is absent.
pub async fn missing_id() -> ApiError {
    ApiError::missing_id()
}

fn parse_id(raw: &str) -> Result<DocumentId, ApiError> {
    DocumentId::parse(raw).map_err(|e| {
        tracing::debug!(id = raw, error = %e, "Rejected path identifier");
        match e {
            IdError::Empty => ApiError::missing_id(),
            IdError::TooLong | IdError::InvalidCharacter => ApiError::BadUrl(e.to_string()),
        }
    })
}
