//! API error types and responses.
//!
//! Every response that is not a record (or list of records) uses the same
//! `{ "type": ..., "details": ... }` envelope. The `type` strings are part of
//! the public contract and stay stable; the HTTP status distinguishes client
//! errors, missing records and store failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use z_commerce_core::DocumentId;
use z_commerce_store::StoreError;

use crate::controllers::ControllerError;

/// Envelope `type` for successful writes.
pub const SUCCESS: &str = "Success";
/// Envelope `type` for rejected input.
pub const WRONG_INPUT: &str = "Wrong Input";
/// Envelope `type` for a missing or blank path identifier.
pub const BAD_URL: &str = "Bad URL";
/// Envelope `type` for an unknown record.
pub const NOT_FOUND: &str = "Not found";
/// Envelope `type` for a disallowed state change.
pub const CONFLICT: &str = "Conflict";
/// Envelope `type` for store failures.
pub const BAD_RESPONSE: &str = "Bad response";

/// Response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    /// Outcome category.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Human-readable description.
    pub details: String,
    /// Identifier of a newly created record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
}

impl Envelope {
    /// A success envelope.
    #[must_use]
    pub fn success(details: impl Into<String>) -> Self {
        Self {
            kind: SUCCESS,
            details: details.into(),
            id: None,
        }
    }

    /// Attach the identifier of a created record.
    #[must_use]
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input failed validation.
    #[error("wrong input: {0}")]
    WrongInput(String),

    /// Input referenced a record that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// The path identifier is missing or blank.
    #[error("bad url: {0}")]
    BadUrl(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested state change is not allowed.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store rejected the operation.
    #[error("bad response: {0}")]
    BadResponse(String),
}

impl ApiError {
    /// Error for a request whose identifier segment is absent.
    #[must_use]
    pub fn missing_id() -> Self {
        Self::BadUrl("the URL must include the 'id' parameter".into())
    }

    /// Error for an identifier that matches no record.
    #[must_use]
    pub fn record_not_found() -> Self {
        Self::NotFound("no record exists with the specified id".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, details) = match self {
            Self::WrongInput(msg) => (StatusCode::BAD_REQUEST, WRONG_INPUT, msg),
            Self::MissingReference(msg) => (StatusCode::UNPROCESSABLE_ENTITY, WRONG_INPUT, msg),
            Self::BadUrl(msg) => (StatusCode::BAD_REQUEST, BAD_URL, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, CONFLICT, msg),
            Self::BadResponse(msg) => {
                tracing::error!(error = %msg, "Store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, BAD_RESPONSE, msg)
            }
        };

        let body = Envelope {
            kind,
            details,
            id: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::record_not_found(),
            StoreError::Database(_) | StoreError::Serialization(_) => {
                Self::BadResponse(err.to_string())
            }
        }
    }
}

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::Invalid(e) => Self::WrongInput(e.message().to_owned()),
            ControllerError::MissingReference(msg) => Self::MissingReference(msg),
            ControllerError::Conflict(e) => Self::Conflict(e.to_string()),
            ControllerError::Storage(e) => e.into(),
            ControllerError::Hashing(e) => Self::BadResponse(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_missing_id() {
        let json = serde_json::to_value(Envelope::success("done")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Success", "details": "done" }));
    }

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err = ApiError::from(StoreError::not_found("accounts", &DocumentId::generate()));
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn store_failure_maps_to_bad_response() {
        let err = ApiError::from(StoreError::Database("disk full".into()));
        assert!(matches!(err, ApiError::BadResponse(msg) if msg.contains("disk full")));
    }

    #[test]
    fn hashing_failure_maps_to_bad_response() {
        let err = ApiError::from(ControllerError::Hashing(z_commerce_core::PasswordError {
            reason: "memory cost too large".into(),
        }));
        assert!(matches!(err, ApiError::BadResponse(msg) if msg.contains("memory cost too large")));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (ApiError::WrongInput(String::new()), StatusCode::BAD_REQUEST),
            (ApiError::MissingReference(String::new()), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::missing_id(), StatusCode::BAD_REQUEST),
            (ApiError::record_not_found(), StatusCode::NOT_FOUND),
            (ApiError::Conflict(String::new()), StatusCode::CONFLICT),
            (ApiError::BadResponse(String::new()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
