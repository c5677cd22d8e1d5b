use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::ApiError;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            ApiError::ValidationError(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::ResourceError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ApiError::UpstreamError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {message}"),
            ),
        };

        (status_code, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, task: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, task: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(task = task, error = format!("{:?}", e));
            ApiError::UpstreamError(format!("{:#}", e))
        })
    }
}

/// Renders a handler panic the same way as any other upstream failure.
pub(crate) fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(task = "handle request", panic = details.as_str());
    ApiError::UpstreamError(details).into_response()
}
