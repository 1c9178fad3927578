use std::fmt;

/// Declares a strongly typed catalog key over a `BIGSERIAL` primary key.
macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Primary key of a movie
    MovieId
);
catalog_id!(
    /// Primary key of an actor or director
    ActorId
);
catalog_id!(CategoryId);
catalog_id!(GenreId);
catalog_id!(
    /// Primary key of a review; also used for the parent edge of threaded reviews
    ReviewId
);
catalog_id!(RatingId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_plain_integers() {
        assert_eq!(MovieId(42).to_string(), "42");
        assert_eq!(i64::from(ReviewId(7)), 7);
        assert_eq!(ActorId::from(3).get(), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&MovieId(12)).unwrap();
        assert_eq!(json, "12");
        let parsed: GenreId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, GenreId(5));
    }
}
