use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::InvalidSeasonType;

/// Failure kinds surfaced to API clients. Each carries the underlying
/// message verbatim.
#[derive(Debug, PartialEq)]
pub enum ApiError {
    NotFound(String),
    UpstreamFailure(String),
    ValidationFailure(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn not_found(err: impl Display) -> Self {
        ApiError::NotFound(err.to_string())
    }

    pub fn upstream(err: impl Display) -> Self {
        ApiError::UpstreamFailure(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(msg)
            | ApiError::UpstreamFailure(msg)
            | ApiError::ValidationFailure(msg) => msg,
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<InvalidSeasonType> for ApiError {
    fn from(err: InvalidSeasonType) -> Self {
        ApiError::ValidationFailure(err.to_string())
    }
}
