use async_trait::async_trait;
use marquee_model::{MovieId, Review, ReviewId};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub name: String,
    pub email: String,
    pub text: String,
    pub movie: MovieId,
    pub parent: Option<ReviewId>,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a review. The movie must exist and be public; a parent must
    /// exist and belong to the same movie. Failures are reported per field
    /// and nothing is written.
    async fn create(&self, review: NewReview) -> Result<Review>;

    /// Every review of a movie in ascending id order.
    async fn list_for_movie(&self, movie: MovieId) -> Result<Vec<Review>>;
}
