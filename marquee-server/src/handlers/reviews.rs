use axum::{Json, extract::State, http::StatusCode};
use marquee_core::api::{requests::CreateReviewRequest, responses::ApiResponse};
use marquee_model::Review;
use tracing::debug;

use crate::infra::{app_state::AppState, errors::AppResult, extract::ValidatedJson};

/// Create a review, threaded under `parent` when one is given.
pub async fn create_review_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let review = state
        .catalog()
        .create_review(request)
        .await
        .inspect_err(|err| debug!(error = %err, "review rejected"))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(review))))
}
