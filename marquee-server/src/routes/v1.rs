use axum::{
    Router,
    routing::{get, post},
};
use marquee_core::api::routes::{utils::strip_root, v1};

use crate::{
    AppState,
    handlers::{actors, movies, ratings, reviews},
};

/// Create all v1 API routes
pub fn create_v1_router(_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            strip_root(v1::movies::COLLECTION),
            get(movies::list_movies_handler).post(movies::create_movie_handler),
        )
        .route(strip_root(v1::movies::ITEM), get(movies::get_movie_handler))
        .route(
            strip_root(v1::actors::COLLECTION),
            get(actors::list_actors_handler).post(actors::create_actor_handler),
        )
        .route(strip_root(v1::actors::ITEM), get(actors::get_actor_handler))
        .route(
            strip_root(v1::reviews::COLLECTION),
            post(reviews::create_review_handler),
        )
        .route(
            strip_root(v1::ratings::COLLECTION),
            post(ratings::rate_movie_handler),
        )
}
