//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod actor;
pub mod error;
pub mod ids;
pub mod movie;
pub mod rating;
pub mod review;
pub mod taxonomy;

pub use actor::{Actor, ActorRole, ActorSummary};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{ActorId, CategoryId, GenreId, MovieId, RatingId, ReviewId};
pub use movie::{Movie, MovieDetail, MovieListItem};
pub use rating::{Rating, Star};
pub use review::{Review, ReviewNode};
pub use taxonomy::{Category, Genre};
