use chrono::NaiveDate;

use crate::actor::{Actor, ActorSummary};
use crate::ids::{ActorId, CategoryId, GenreId, MovieId};
use crate::review::ReviewNode;

/// Complete movie record including relation keys and the draft flag.
///
/// This is the administrative shape: it is what movie creation returns and
/// the only shape that exposes `draft`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub id: MovieId,
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

/// Row of the public movie listing, annotated for the requesting client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieListItem {
    pub id: MovieId,
    pub title: String,
    pub tagline: String,
    pub category: Option<CategoryId>,
    /// Whether the requesting client has rated this movie.
    pub rating_user: bool,
    /// Truncated integer mean of all stars; `None` when nobody rated yet.
    pub middle_star: Option<i64>,
}

/// Public movie detail page. Relations are rendered for display: category
/// and genres by name, directors as summaries, actors in full, and reviews
/// as root threads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub poster: String,
    pub year: i16,
    pub country: String,
    pub world_premiere: NaiveDate,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub url: String,
    pub category: Option<String>,
    pub directors: Vec<ActorSummary>,
    pub actors: Vec<Actor>,
    pub genres: Vec<String>,
    pub reviews: Vec<ReviewNode>,
}
