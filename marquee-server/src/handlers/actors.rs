use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use marquee_core::{
    api::{requests::CreateActorRequest, responses::ApiResponse},
    query::{Page, PageParams},
};
use marquee_model::{Actor, ActorId, ActorSummary};
use tracing::{debug, info};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiPath, ApiQuery, ValidatedJson},
};

pub async fn list_actors_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<ApiResponse<Page<ActorSummary>>>> {
    let page = state.catalog().list_actors(params).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_actor_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Actor>>> {
    let actor = state.catalog().actor_detail(ActorId(id)).await?;
    Ok(Json(ApiResponse::success(actor)))
}

pub async fn create_actor_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateActorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Actor>>)> {
    let actor = state
        .catalog()
        .create_actor(request)
        .await
        .inspect_err(|err| debug!(error = %err, "actor rejected"))?;
    info!(actor_id = %actor.id, role = actor.role.as_str(), "actor created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(actor))))
}
