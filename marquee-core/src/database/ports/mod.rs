//! Storage-agnostic repository traits. Handlers and the catalog service only
//! ever see these; PostgreSQL and the in-memory catalog implement them.

pub mod actors;
pub mod movies;
pub mod ratings;
pub mod reviews;

pub use actors::{ActorRepository, NewActor};
pub use movies::{MovieDetailParts, MovieRepository, NewMovie};
pub use ratings::{NewRating, RatingRepository};
pub use reviews::{NewReview, ReviewRepository};
