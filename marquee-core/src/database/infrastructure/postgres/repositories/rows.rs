//! Row shapes shared by the repositories and their conversion into model
//! types.

use chrono::{DateTime, NaiveDate, Utc};
use marquee_model::{
    Actor, ActorId, ActorRole, CategoryId, Movie, MovieId, Rating, RatingId, Review, ReviewId, Star,
};
use sqlx::FromRow;

use crate::error::{CatalogError, Result};

#[derive(Debug, FromRow)]
pub(super) struct ActorRow {
    pub id: i64,
    pub name: String,
    pub age: i16,
    pub role: String,
    pub description: String,
    pub image: String,
}

impl TryFrom<ActorRow> for Actor {
    type Error = CatalogError;

    fn try_from(row: ActorRow) -> Result<Self> {
        let role: ActorRole = row.role.parse().map_err(|e| {
            CatalogError::Internal(format!("Actor {} has a corrupt role: {}", row.id, e))
        })?;
        Ok(Actor {
            id: ActorId(row.id),
            name: row.name,
            age: row.age,
            role,
            description: row.description,
            image: row.image,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct MovieRow {
    pub id: i64,
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
    pub category_id: Option<i64>,
    pub url: String,
    pub draft: bool,
}

impl MovieRow {
    /// Relation ids are filled in by the caller.
    pub fn into_movie(self) -> Movie {
        Movie {
            id: MovieId(self.id),
            title: self.title,
            tagline: self.tagline,
            description: self.description,
            poster: self.poster,
            year: self.year,
            country: self.country,
            directors: Vec::new(),
            actors: Vec::new(),
            genres: Vec::new(),
            world_premiere: self.world_premiere,
            budget: self.budget,
            fees_in_usa: self.fees_in_usa,
            fees_in_world: self.fees_in_world,
            category: self.category_id.map(CategoryId),
            url: self.url,
            draft: self.draft,
        }
    }
}

pub(super) const MOVIE_COLUMNS: &str = "m.id, m.title, m.tagline, m.description, m.poster, m.year, \
     m.country, m.world_premiere, m.budget, m.fees_in_usa, m.fees_in_world, m.category_id, \
     m.url, m.draft";

#[derive(Debug, FromRow)]
pub(super) struct ReviewRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub text: String,
    pub movie_id: i64,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId(row.id),
            name: row.name,
            email: row.email,
            text: row.text,
            movie: MovieId(row.movie_id),
            parent: row.parent_id.map(ReviewId),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct RatingRow {
    pub id: i64,
    pub ip: String,
    pub star: i16,
    pub movie_id: i64,
}

impl TryFrom<RatingRow> for Rating {
    type Error = CatalogError;

    fn try_from(row: RatingRow) -> Result<Self> {
        let star = Star::new(i64::from(row.star)).map_err(|e| {
            CatalogError::Internal(format!("Rating {} is corrupt: {}", row.id, e))
        })?;
        Ok(Rating {
            id: RatingId(row.id),
            ip: row.ip,
            star,
            movie: MovieId(row.movie_id),
        })
    }
}

/// Whether a non-draft movie with this id exists.
pub(super) async fn movie_is_public<'e, E>(executor: E, movie: MovieId) -> Result<bool>
where
    E: sqlx::PgExecutor<'e>,
{
    let public: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1 AND draft = FALSE)")
            .bind(movie.get())
            .fetch_one(executor)
            .await?;
    Ok(public)
}
