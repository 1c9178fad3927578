use axum::{Json, extract::State, http::StatusCode};
use marquee_core::api::{
    requests::CreateRatingRequest,
    responses::{ApiResponse, RatingReceipt},
};
use tracing::debug;

use crate::infra::{
    app_state::AppState, client_ip::ClientIp, errors::AppResult, extract::ValidatedJson,
};

/// Rate a movie as the calling client. Rating again replaces the star.
pub async fn rate_movie_handler(
    State(state): State<AppState>,
    client: ClientIp,
    ValidatedJson(request): ValidatedJson<CreateRatingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RatingReceipt>>)> {
    let receipt = state
        .catalog()
        .rate_movie(&client.as_key(), request)
        .await
        .inspect_err(|err| debug!(client = %client.0, error = %err, "rating rejected"))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(receipt))))
}
