//! Catalog use cases: the operations behind every public endpoint.

use marquee_model::{Actor, ActorId, ActorSummary, Movie, MovieDetail, MovieId, MovieListItem, Review};
use tracing::debug;

use super::unit_of_work::AppUnitOfWork;
use crate::api::requests::{
    CreateActorRequest, CreateMovieRequest, CreateRatingRequest, CreateReviewRequest,
};
use crate::api::responses::RatingReceipt;
use crate::api::routes::v1;
use crate::domain::reviews::{DEFAULT_MAX_REVIEW_DEPTH, render_review_threads};
use crate::error::{CatalogError, Result};
use crate::query::{MovieListParams, Page, PageParams};

/// Tunables for listing and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub movies_page_size: u32,
    pub actors_page_size: u32,
    pub max_page_size: u32,
    pub max_review_depth: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            movies_page_size: 10,
            actors_page_size: 20,
            max_page_size: 1000,
            max_review_depth: DEFAULT_MAX_REVIEW_DEPTH,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogService {
    uow: AppUnitOfWork,
    settings: CatalogSettings,
}

impl CatalogService {
    pub fn new(uow: AppUnitOfWork, settings: CatalogSettings) -> Self {
        Self { uow, settings }
    }

    pub async fn list_movies(
        &self,
        client_ip: &str,
        params: &MovieListParams,
    ) -> Result<Page<MovieListItem>> {
        let filter = params.filter()?;
        let request = params
            .page_params()
            .resolve(self.settings.movies_page_size, self.settings.max_page_size)?;

        let paged = self.uow.movies.list_public(client_ip, &filter, request).await?;
        Page::build(paged, request, v1::movies::COLLECTION, &filter.query_pairs())
    }

    pub async fn movie_detail(&self, id: MovieId) -> Result<MovieDetail> {
        let parts = self
            .uow
            .movies
            .get_public(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Movie {} not found", id)))?;
        let reviews = self.uow.reviews.list_for_movie(id).await?;
        debug!(movie_id = %id, reviews = reviews.len(), "Rendering movie detail");

        let movie = parts.movie;
        Ok(MovieDetail {
            id: movie.id,
            title: movie.title,
            tagline: movie.tagline,
            description: movie.description,
            poster: movie.poster,
            year: movie.year,
            country: movie.country,
            world_premiere: movie.world_premiere,
            budget: movie.budget,
            fees_in_usa: movie.fees_in_usa,
            fees_in_world: movie.fees_in_world,
            url: movie.url,
            category: parts.category,
            directors: parts.directors,
            actors: parts.actors,
            genres: parts.genres,
            reviews: render_review_threads(&reviews, self.settings.max_review_depth),
        })
    }

    pub async fn create_movie(&self, request: CreateMovieRequest) -> Result<Movie> {
        let movie = request.into_new_movie()?;
        self.uow.movies.create(movie).await
    }

    pub async fn create_review(&self, request: CreateReviewRequest) -> Result<Review> {
        let review = request.into_new_review()?;
        self.uow.reviews.create(review).await
    }

    /// Create or replace the rating of `client_ip` for the requested movie.
    pub async fn rate_movie(
        &self,
        client_ip: &str,
        request: CreateRatingRequest,
    ) -> Result<RatingReceipt> {
        let rating = request.into_new_rating(client_ip)?;
        let stored = self.uow.ratings.upsert(rating).await?;
        Ok(RatingReceipt::from(&stored))
    }

    pub async fn list_actors(&self, params: PageParams) -> Result<Page<ActorSummary>> {
        let request =
            params.resolve(self.settings.actors_page_size, self.settings.max_page_size)?;
        let paged = self.uow.actors.list(request).await?;
        Page::build(paged, request, v1::actors::COLLECTION, &[])
    }

    pub async fn actor_detail(&self, id: ActorId) -> Result<Actor> {
        self.uow
            .actors
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Actor {} not found", id)))
    }

    pub async fn create_actor(&self, request: CreateActorRequest) -> Result<Actor> {
        let actor = request.into_new_actor()?;
        self.uow.actors.create(actor).await
    }
}
