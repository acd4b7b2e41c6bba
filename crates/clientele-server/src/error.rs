//! HTTP error responses and configuration errors.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clientele_core::error::ClienteleError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors raised while loading [`ServerConfig`](crate::config::ServerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    #[error("CLIENTELE_DATABASE_URL must be set to the database connection string")]
    MissingDatabaseUrl,

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// An error rendered as `{"error": "<message>"}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", title_case(entity)))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ClienteleError> for ApiError {
    fn from(err: ClienteleError) -> Self {
        match err {
            ClienteleError::NotFound { entity, .. } => ApiError::not_found(&entity),
            ClienteleError::AlreadyExists {
                entity,
                field,
                value,
            } => ApiError::new(
                StatusCode::CONFLICT,
                format!("A {entity} with {field} {value} already exists"),
            ),
            ClienteleError::Validation { message } => {
                ApiError::new(StatusCode::BAD_REQUEST, message)
            }
            ClienteleError::Unavailable(detail) => {
                error!(error = %detail, "Database unavailable");
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
            }
            ClienteleError::Database(detail) | ClienteleError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = self.status.as_u16(), error = %self.message, "Request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
