use async_trait::async_trait;
use marquee_model::{MovieId, Rating, Star};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    /// Client identity as resolved by the network layer.
    pub ip: String,
    pub star: Star,
    pub movie: MovieId,
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert the rating or overwrite the star of the existing
    /// `(ip, movie)` rating in one atomic step. Unknown or draft movies are a
    /// field error on `movie`.
    async fn upsert(&self, rating: NewRating) -> Result<Rating>;
}
