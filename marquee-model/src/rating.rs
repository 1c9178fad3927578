use std::fmt;

use crate::error::ModelError;
use crate::ids::{MovieId, RatingId};

/// Star value in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "i64")
)]
pub struct Star(u8);

impl Star {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, ModelError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ModelError::StarOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Star {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Star::new(value)
    }
}

impl From<Star> for i64 {
    fn from(star: Star) -> Self {
        i64::from(star.0)
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client's star rating of one movie. At most one exists per `(ip, movie)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rating {
    pub id: RatingId,
    pub ip: String,
    pub star: Star,
    pub movie: MovieId,
}
