use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by all endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid image upload: {0}")]
    InvalidImage(String),

    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Missing required form field: {0}")]
    MissingField(&'static str),

    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidImage(_)
            | ApiError::InvalidParameter { .. }
            | ApiError::MissingField(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Encode(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
