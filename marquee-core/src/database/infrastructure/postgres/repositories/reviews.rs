use async_trait::async_trait;
use marquee_model::{MovieId, Review};
use sqlx::PgPool;
use tracing::info;

use super::rows::{ReviewRow, movie_is_public};
use crate::database::ports::reviews::{NewReview, ReviewRepository};
use crate::error::{CatalogError, FieldErrors, Result};

/// PostgreSQL-backed implementation of the `ReviewRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: NewReview) -> Result<Review> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to start transaction: {}", e)))?;

        let mut errors = FieldErrors::new();
        if !movie_is_public(&mut *tx, review.movie).await? {
            errors.add_missing("movie", review.movie);
        }

        if let Some(parent) = review.parent {
            let parent_movie: Option<i64> =
                sqlx::query_scalar("SELECT movie_id FROM reviews WHERE id = $1")
                    .bind(parent.get())
                    .fetch_optional(&mut *tx)
                    .await?;
            match parent_movie {
                None => errors.add_missing("parent", parent),
                Some(movie_id) if movie_id != review.movie.get() => errors.add(
                    "parent",
                    "Parent review belongs to a different movie.",
                ),
                Some(_) => {}
            }
        }
        errors.into_result()?;

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (name, email, text, movie_id, parent_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, text, movie_id, parent_id, created_at
            "#,
        )
        .bind(&review.name)
        .bind(&review.email)
        .bind(&review.text)
        .bind(review.movie.get())
        .bind(review.parent.map(|parent| parent.get()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // A parent deleted between the check and the insert.
            if let Some(db_err) = e.as_database_error()
                && db_err.is_foreign_key_violation()
            {
                return CatalogError::invalid_field("parent", "Referenced review no longer exists.");
            }
            CatalogError::Internal(format!("Failed to create review: {}", e))
        })?;

        tx.commit()
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to commit transaction: {}", e)))?;

        let created = Review::from(row);
        info!(
            review_id = %created.id,
            movie_id = %created.movie,
            reply = !created.is_root(),
            "Created review"
        );
        Ok(created)
    }

    async fn list_for_movie(&self, movie: MovieId) -> Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, name, email, text, movie_id, parent_id, created_at
            FROM reviews
            WHERE movie_id = $1
            ORDER BY id
            "#,
        )
        .bind(movie.get())
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
