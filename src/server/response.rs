use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::ServiceError;

/// Envelope shared by every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::FoodItemNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::EmptyBatch
            | ServiceError::BatchTooLarge { .. }
            | ServiceError::InvalidThreshold(_)
            | ServiceError::InvalidSampleSize(_) => StatusCode::BAD_REQUEST,
            ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Backend details stay in the logs.
        let message = if err.is_client_error() {
            err.to_string()
        } else {
            error!(error = %err, "Request failed");
            "Internal server error".to_string()
        };

        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}
