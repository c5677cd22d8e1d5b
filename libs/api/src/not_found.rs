use axum::{http::StatusCode, Json};

use crate::response::ErrorResponse;

pub(super) async fn get_404() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
