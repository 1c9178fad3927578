use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::ports::{
    actors::ActorRepository, movies::MovieRepository, ratings::RatingRepository,
    reviews::ReviewRepository,
};
#[cfg(feature = "database")]
use crate::database::{
    infrastructure::postgres::{
        PostgresActorRepository, PostgresMovieRepository, PostgresRatingRepository,
        PostgresReviewRepository,
    },
    postgres::PostgresDatabase,
};

/// Aggregates the repository ports used by the catalog service.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub movies: Arc<dyn MovieRepository>,
    pub actors: Arc<dyn ActorRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub ratings: Arc<dyn RatingRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("movies", &type_name_of_val(self.movies.as_ref()))
            .field("actors", &type_name_of_val(self.actors.as_ref()))
            .field("reviews", &type_name_of_val(self.reviews.as_ref()))
            .field("ratings", &type_name_of_val(self.ratings.as_ref()))
            .finish()
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    movies: Option<Arc<dyn MovieRepository>>,
    actors: Option<Arc<dyn ActorRepository>>,
    reviews: Option<Arc<dyn ReviewRepository>>,
    ratings: Option<Arc<dyn RatingRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("movies", &self.movies.is_some())
            .field("actors", &self.actors.is_some())
            .field("reviews", &self.reviews.is_some())
            .field("ratings", &self.ratings.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, repo: Arc<dyn MovieRepository>) -> Self {
        self.movies = Some(repo);
        self
    }
    pub fn with_actors(mut self, repo: Arc<dyn ActorRepository>) -> Self {
        self.actors = Some(repo);
        self
    }
    pub fn with_reviews(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.reviews = Some(repo);
        self
    }
    pub fn with_ratings(mut self, repo: Arc<dyn RatingRepository>) -> Self {
        self.ratings = Some(repo);
        self
    }

    /// Build the unit of work, naming the first missing repository.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            movies: self
                .movies
                .ok_or_else(|| "missing MovieRepository".to_string())?,
            actors: self
                .actors
                .ok_or_else(|| "missing ActorRepository".to_string())?,
            reviews: self
                .reviews
                .ok_or_else(|| "missing ReviewRepository".to_string())?,
            ratings: self
                .ratings
                .ok_or_else(|| "missing RatingRepository".to_string())?,
        })
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWork {
    /// Compose all Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: Arc<PostgresDatabase>) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWorkBuilder {
    /// Populate the builder with Postgres-backed repository adapters.
    pub fn with_postgres(mut self, db: Arc<PostgresDatabase>) -> Self {
        let pool = db.pool().clone();

        let movies: Arc<dyn MovieRepository> =
            Arc::new(PostgresMovieRepository::new(pool.clone()));
        self.movies = Some(movies);

        let actors: Arc<dyn ActorRepository> =
            Arc::new(PostgresActorRepository::new(pool.clone()));
        self.actors = Some(actors);

        let reviews: Arc<dyn ReviewRepository> =
            Arc::new(PostgresReviewRepository::new(pool.clone()));
        self.reviews = Some(reviews);

        let ratings: Arc<dyn RatingRepository> = Arc::new(PostgresRatingRepository::new(pool));
        self.ratings = Some(ratings);

        self
    }
}
