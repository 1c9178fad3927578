use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use marquee_core::{
    api::{requests::CreateMovieRequest, responses::ApiResponse},
    query::{MovieListParams, Page},
};
use marquee_model::{Movie, MovieDetail, MovieId, MovieListItem};
use tracing::{debug, info};

use crate::infra::{
    app_state::AppState,
    client_ip::ClientIp,
    errors::AppResult,
    extract::{ApiPath, ApiQuery, ValidatedJson},
};

/// Public movie list annotated for the calling client.
pub async fn list_movies_handler(
    State(state): State<AppState>,
    client: ClientIp,
    ApiQuery(params): ApiQuery<MovieListParams>,
) -> AppResult<Json<ApiResponse<Page<MovieListItem>>>> {
    let page = state
        .catalog()
        .list_movies(&client.as_key(), &params)
        .await
        .inspect_err(|err| debug!(error = %err, "movie list rejected"))?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_movie_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<MovieDetail>>> {
    let movie = state.catalog().movie_detail(MovieId(id)).await?;
    Ok(Json(ApiResponse::success(movie)))
}

pub async fn create_movie_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Movie>>)> {
    let movie = state
        .catalog()
        .create_movie(request)
        .await
        .inspect_err(|err| debug!(error = %err, "movie rejected"))?;
    info!(movie_id = %movie.id, url = %movie.url, "movie created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(movie))))
}
