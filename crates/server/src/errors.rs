use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::response::ApiResponse;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Turns a service failure into an error envelope.
/// Storage causes are logged here and replaced by `context`, never echoed.
pub fn failure(err: ServiceError, context: &str) -> Response {
    match err {
        ServiceError::Model(models::errors::ModelError::Validation(msg)) => {
            ApiResponse::error(msg, StatusCode::BAD_REQUEST)
        }
        ServiceError::NotFound(msg) => ApiResponse::error(msg, StatusCode::NOT_FOUND),
        e @ (ServiceError::Db(_) | ServiceError::Model(_)) => {
            error!(err = %e, context, "store operation failed");
            ApiResponse::error(context, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
    .into_response()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
