use async_trait::async_trait;
use marquee_model::Rating;
use sqlx::PgPool;
use tracing::info;

use super::rows::RatingRow;
use crate::database::ports::ratings::{NewRating, RatingRepository};
use crate::error::{CatalogError, FieldErrors, Result};

/// PostgreSQL-backed implementation of the `RatingRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn upsert(&self, rating: NewRating) -> Result<Rating> {
        // The movie check is part of the statement: no row comes back when
        // the movie is unknown or still a draft.
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            INSERT INTO ratings (ip, star, movie_id)
            SELECT $1, $2, m.id
            FROM movies m
            WHERE m.id = $3 AND m.draft = FALSE
            ON CONFLICT (ip, movie_id) DO UPDATE SET star = EXCLUDED.star
            RETURNING id, ip, star, movie_id
            "#,
        )
        .bind(&rating.ip)
        .bind(i16::from(rating.star.value()))
        .bind(rating.movie.get())
        .fetch_optional(self.pool())
        .await?;

        let Some(row) = row else {
            let mut errors = FieldErrors::new();
            errors.add_missing("movie", rating.movie);
            return Err(CatalogError::Validation(errors));
        };

        let stored = Rating::try_from(row)?;
        info!(
            movie_id = %stored.movie,
            star = %stored.star,
            "Stored rating"
        );
        Ok(stored)
    }
}
