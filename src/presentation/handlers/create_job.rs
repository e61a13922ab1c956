use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::services::SubmitError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct CreateJobResponse {
    pub id: String,
    pub url: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn create_job_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> impl IntoResponse {
    match state.job_service.submit(&request.url).await {
        Ok(job) => (
            StatusCode::CREATED,
            Json(CreateJobResponse {
                id: job.id.as_uuid().to_string(),
                url: job.url,
                status: job.status.as_str().to_string(),
            }),
        )
            .into_response(),
        Err(SubmitError::InvalidUrl) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "URL is required".to_string(),
            }),
        )
            .into_response(),
        Err(SubmitError::QueueClosed) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Service is shutting down".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create job record");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create job".to_string(),
                }),
            )
                .into_response()
        }
    }
}
