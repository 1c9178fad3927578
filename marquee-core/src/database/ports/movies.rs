use async_trait::async_trait;
use chrono::NaiveDate;
use marquee_model::{
    Actor, ActorId, ActorSummary, CategoryId, GenreId, Movie, MovieId, MovieListItem,
};

use crate::error::Result;
use crate::query::{MovieFilter, PageRequest, Paged};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub poster: String,
    pub year: i16,
    pub country: String,
    pub directors: Vec<ActorId>,
    pub actors: Vec<ActorId>,
    pub genres: Vec<GenreId>,
    pub world_premiere: NaiveDate,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub category: Option<CategoryId>,
    pub url: String,
    pub draft: bool,
}

/// A public movie with its relations resolved for display. Reviews are
/// loaded separately and rendered as threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailParts {
    pub movie: Movie,
    pub category: Option<String>,
    pub directors: Vec<ActorSummary>,
    pub actors: Vec<Actor>,
    pub genres: Vec<String>,
}

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// One page of non-draft movies ordered by id, annotated for `client_ip`
    /// with `rating_user` and `middle_star`.
    async fn list_public(
        &self,
        client_ip: &str,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<Paged<MovieListItem>>;

    /// Detail of a non-draft movie. Drafts and unknown ids yield `None`.
    async fn get_public(&self, id: MovieId) -> Result<Option<MovieDetailParts>>;

    /// Create a movie and its genre and cast links atomically. Unknown
    /// category, genre or cast ids and a taken `url` are field errors.
    async fn create(&self, movie: NewMovie) -> Result<Movie>;
}
