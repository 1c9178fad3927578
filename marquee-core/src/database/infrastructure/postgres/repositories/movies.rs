use std::collections::BTreeSet;

use async_trait::async_trait;
use marquee_model::{
    Actor, ActorId, ActorSummary, CategoryId, GenreId, Movie, MovieId, MovieListItem,
};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::rows::{ActorRow, MOVIE_COLUMNS, MovieRow};
use crate::database::ports::movies::{MovieDetailParts, MovieRepository, NewMovie};
use crate::error::{CatalogError, FieldErrors, Result};
use crate::query::{MovieFilter, PageRequest, Paged};

const URL_UNIQUE_CONSTRAINT: &str = "movies_url_key";

#[derive(Debug, FromRow)]
struct MovieListRow {
    id: i64,
    title: String,
    tagline: String,
    category_id: Option<i64>,
    rating_user: bool,
    middle_star: Option<i64>,
}

impl From<MovieListRow> for MovieListItem {
    fn from(row: MovieListRow) -> Self {
        MovieListItem {
            id: MovieId(row.id),
            title: row.title,
            tagline: row.tagline,
            category: row.category_id.map(CategoryId),
            rating_user: row.rating_user,
            middle_star: row.middle_star,
        }
    }
}

#[derive(Debug, FromRow)]
struct CastRow {
    #[sqlx(flatten)]
    actor: ActorRow,
    credit: String,
}

#[derive(Debug, FromRow)]
struct GenreRow {
    id: i64,
    name: String,
}

/// PostgreSQL-backed implementation of the `MovieRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `WHERE` clause of the public listing, shared by the page and count
    /// queries. Genre matching is an `EXISTS` sub-select so the ratings join
    /// is never multiplied.
    fn push_public_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &MovieFilter) {
        builder.push(" WHERE m.draft = FALSE");
        if let Some(min) = filter.year_min {
            builder.push(" AND m.year >= ").push_bind(min);
        }
        if let Some(max) = filter.year_max {
            builder.push(" AND m.year <= ").push_bind(max);
        }
        if !filter.genres.is_empty() {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM movie_genres mg \
                     JOIN genres g ON g.id = mg.genre_id \
                     WHERE mg.movie_id = m.id AND g.name = ANY(",
                )
                .push_bind(filter.genres.clone())
                .push("))");
        }
    }

    async fn missing_ids(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        table: &str,
        ids: &[i64],
    ) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM ");
        builder
            .push(table)
            .push(" WHERE id = ANY(")
            .push_bind(ids.to_vec())
            .push(")");
        let found: BTreeSet<i64> = builder
            .build_query_scalar::<i64>()
            .fetch_all(&mut **tx)
            .await?
            .into_iter()
            .collect();
        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }

    async fn check_references(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        movie: &NewMovie,
    ) -> Result<()> {
        let mut errors = FieldErrors::new();

        if let Some(category) = movie.category {
            for id in Self::missing_ids(tx, "categories", &[category.get()]).await? {
                errors.add_missing("category", id);
            }
        }

        let genre_ids: Vec<i64> = movie.genres.iter().map(|id| id.get()).collect();
        for id in Self::missing_ids(tx, "genres", &genre_ids).await? {
            errors.add_missing("genres", id);
        }

        for (field, cast) in [("directors", &movie.directors), ("actors", &movie.actors)] {
            let ids: Vec<i64> = cast.iter().map(|id| id.get()).collect();
            for id in Self::missing_ids(tx, "actors", &ids).await? {
                errors.add_missing(field, id);
            }
        }

        errors.into_result()
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn list_public(
        &self,
        client_ip: &str,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<Paged<MovieListItem>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM movies m");
        Self::push_public_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await?;

        // SUM and COUNT are BIGINT, so the mean truncates. NULLIF turns the
        // zero-rating case into NULL instead of a division error.
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                m.id, m.title, m.tagline, m.category_id,
                COUNT(r.id) FILTER (WHERE r.ip = "#,
        );
        builder.push_bind(client_ip.to_string());
        builder.push(
            r#") > 0 AS rating_user,
                SUM(r.star) / NULLIF(COUNT(r.id), 0) AS middle_star
            FROM movies m
            LEFT JOIN ratings r ON r.movie_id = m.id"#,
        );
        Self::push_public_filter(&mut builder, filter);
        builder
            .push(" GROUP BY m.id ORDER BY m.id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = builder
            .build_query_as::<MovieListRow>()
            .fetch_all(self.pool())
            .await?;

        debug!(
            total,
            returned = rows.len(),
            page = page.page,
            "Listed public movies"
        );
        Ok(Paged::new(
            rows.into_iter().map(MovieListItem::from).collect(),
            total.max(0) as u64,
        ))
    }

    async fn get_public(&self, id: MovieId) -> Result<Option<MovieDetailParts>> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS}, c.name AS category_name \
             FROM movies m LEFT JOIN categories c ON c.id = m.category_id \
             WHERE m.id = $1 AND m.draft = FALSE"
        );

        #[derive(FromRow)]
        struct DetailRow {
            #[sqlx(flatten)]
            movie: MovieRow,
            category_name: Option<String>,
        }

        let Some(row) = sqlx::query_as::<_, DetailRow>(&sql)
            .bind(id.get())
            .fetch_optional(self.pool())
            .await?
        else {
            return Ok(None);
        };

        let cast = sqlx::query_as::<_, CastRow>(
            r#"
            SELECT a.id, a.name, a.age, a.role, a.description, a.image, mc.credit
            FROM movie_cast mc
            JOIN actors a ON a.id = mc.actor_id
            WHERE mc.movie_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(id.get())
        .fetch_all(self.pool())
        .await?;

        let genres = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT g.id, g.name
            FROM movie_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE mg.movie_id = $1
            ORDER BY g.id
            "#,
        )
        .bind(id.get())
        .fetch_all(self.pool())
        .await?;

        let mut movie = row.movie.into_movie();
        let mut directors = Vec::new();
        let mut actors = Vec::new();
        for cast_row in cast {
            let credit = cast_row.credit;
            let actor = Actor::try_from(cast_row.actor)?;
            match credit.as_str() {
                "director" => {
                    movie.directors.push(actor.id);
                    directors.push(ActorSummary::from(&actor));
                }
                "actor" => {
                    movie.actors.push(actor.id);
                    actors.push(actor);
                }
                other => {
                    return Err(CatalogError::Internal(format!(
                        "Movie {} has an unknown cast credit: {}",
                        id, other
                    )));
                }
            }
        }
        movie.genres = genres.iter().map(|genre| GenreId(genre.id)).collect();

        Ok(Some(MovieDetailParts {
            movie,
            category: row.category_name,
            directors,
            actors,
            genres: genres.into_iter().map(|genre| genre.name).collect(),
        }))
    }

    async fn create(&self, new_movie: NewMovie) -> Result<Movie> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to start transaction: {}", e)))?;

        Self::check_references(&mut tx, &new_movie).await?;

        let sql = format!(
            "INSERT INTO movies AS m (title, tagline, description, poster, year, country, \
             world_premiere, budget, fees_in_usa, fees_in_world, category_id, url, draft) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {MOVIE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(&new_movie.title)
            .bind(&new_movie.tagline)
            .bind(&new_movie.description)
            .bind(&new_movie.poster)
            .bind(new_movie.year)
            .bind(&new_movie.country)
            .bind(new_movie.world_premiere)
            .bind(new_movie.budget)
            .bind(new_movie.fees_in_usa)
            .bind(new_movie.fees_in_world)
            .bind(new_movie.category.map(|id| id.get()))
            .bind(&new_movie.url)
            .bind(new_movie.draft)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error()
                    && db_err.constraint() == Some(URL_UNIQUE_CONSTRAINT)
                {
                    return CatalogError::invalid_field(
                        "url",
                        "movie with this url already exists.",
                    );
                }
                CatalogError::Internal(format!("Failed to create movie: {}", e))
            })?;
        let movie_id = row.id;

        if !new_movie.genres.is_empty() {
            let mut links =
                QueryBuilder::<Postgres>::new("INSERT INTO movie_genres (movie_id, genre_id) ");
            links.push_values(&new_movie.genres, |mut b, genre| {
                b.push_bind(movie_id).push_bind(genre.get());
            });
            links.build().execute(&mut *tx).await?;
        }

        let credits: Vec<(ActorId, &str)> = new_movie
            .directors
            .iter()
            .map(|id| (*id, "director"))
            .chain(new_movie.actors.iter().map(|id| (*id, "actor")))
            .collect();
        if !credits.is_empty() {
            let mut links = QueryBuilder::<Postgres>::new(
                "INSERT INTO movie_cast (movie_id, actor_id, credit) ",
            );
            links.push_values(&credits, |mut b, (actor, credit)| {
                b.push_bind(movie_id)
                    .push_bind(actor.get())
                    .push_bind(credit.to_string());
            });
            links.build().execute(&mut *tx).await?;
        }

        tx.commit()
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to commit transaction: {}", e)))?;

        let mut movie = row.into_movie();
        movie.directors = new_movie.directors;
        movie.actors = new_movie.actors;
        movie.genres = new_movie.genres;

        info!("Created movie: {} ({}), draft={}", movie.title, movie.id, movie.draft);
        Ok(movie)
    }
}
