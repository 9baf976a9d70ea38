use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every failure the API reports. Clients only ever see the status code and
/// its fixed message; the underlying cause is logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable request")]
    UnprocessableEntity,
    #[error("internal server error")]
    Internal,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Metrics(#[from] prometheus::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: &'static str,
    error: u16,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal | ApiError::Database(_) | ApiError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Database(e) => tracing::error!("Database error: {e}"),
            ApiError::Metrics(e) => tracing::error!("Failed to encode metrics: {e}"),
            _ => tracing::debug!("Request failed: {self}"),
        }
        let message = match status {
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable request",
            _ => "internal server error",
        };
        let body = ErrorBody {
            success: false,
            message,
            error: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {rejection}");
        ApiError::UnprocessableEntity
    }
}

// a path segment that does not parse can not name an existing resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {rejection}");
        ApiError::NotFound
    }
}

// the page is the only query parameter, a query that does not parse names no page
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {rejection}");
        ApiError::NotFound
    }
}
