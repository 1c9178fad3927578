//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::actors::PostgresActorRepository;
pub use repositories::movies::PostgresMovieRepository;
pub use repositories::ratings::PostgresRatingRepository;
pub use repositories::reviews::PostgresReviewRepository;
