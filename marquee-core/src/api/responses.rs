use marquee_model::{MovieId, Rating, Star};
use serde::{Deserialize, Serialize};

/// Standard API envelope for successful responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// What a client sees after rating a movie. The stored client identity is
/// never echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingReceipt {
    pub star: Star,
    pub movie: MovieId,
}

impl From<&Rating> for RatingReceipt {
    fn from(rating: &Rating) -> Self {
        Self {
            star: rating.star,
            movie: rating.movie,
        }
    }
}
