use axum::{body::Bytes, extract::State, Json};
use crew::NewsletterInputs;
use tracing::{error, info};

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{template, ApiError, ApiState};

use self::{request::GenerateRequest, response::GenerateResponse};

pub static TEMPLATE_ERROR: &str = "Failed to load HTML template";

/// Generate a newsletter
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (
            status = 200,
            description = "Newsletter generated",
            body = GenerateResponse
        ),
        (
            status = 400,
            description = "topic or personal_message is missing",
            body = ErrorResponse
        ),
        (
            status = 500,
            description = "Template could not be loaded or generation failed",
            body = ErrorResponse
        )
    )
)]
pub async fn post_generate(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResponse<Json<GenerateResponse>> {
    let request = GenerateRequest::from_body(&body)?;

    let html_template =
        template::load(&state.template_path).await.map_err(|e| {
            error!(
                task = "load template",
                path = state.template_path.display().to_string(),
                error = e.to_string()
            );
            ApiError::ResourceError(TEMPLATE_ERROR.to_string())
        })?;

    info!(task = "generate newsletter", topic = request.topic.as_str());

    let result = state
        .synthesizer
        .synthesize(NewsletterInputs {
            topic: request.topic,
            personal_message: request.personal_message,
            html_template,
        })
        .await
        .into_response("generate newsletter")?;

    Ok(Json(GenerateResponse::success(result)))
}
