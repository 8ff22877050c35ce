//! API error kinds and their JSON envelope

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body missing required fields or not matching the schema
    #[error("bad request: {0}")]
    BadInput(String),

    /// Empty page or unknown id
    #[error("resource not found")]
    NotFound,

    /// Store failure while creating or deleting
    #[error("unprocessable: {0}")]
    Unprocessable(#[source] sqlx::Error),

    /// Store failure while reading
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    // Clients match on these strings, including the spelling of "resourse".
    fn message(&self) -> &'static str {
        match self {
            ApiError::BadInput(_) => "bad request",
            ApiError::NotFound => "resourse not found",
            ApiError::Unprocessable(_) => "Unprocessable",
            ApiError::Store(_) => "internal server error",
            ApiError::MethodNotAllowed => "method not allowed",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unprocessable(_) | ApiError::Store(_) => {
                tracing::error!(error = %self, "Store operation failed")
            }
            ApiError::BadInput(reason) => tracing::debug!(%reason, "Rejected request"),
            _ => {}
        }

        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}
