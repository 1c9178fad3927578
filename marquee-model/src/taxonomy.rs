use crate::ids::{CategoryId, GenreId};

/// Movie category (feature film, series, cartoon...). One per movie.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub url: String,
}

/// Genre tag. A movie carries any number of genres.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: String,
    pub url: String,
}
