use serde::Deserialize;

use super::pagination::PageParams;
use crate::error::{CatalogError, Result};

/// Query string of the movie collection. Kept flat because urlencoded
/// deserialization cannot type numbers inside flattened structs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListParams {
    /// Comma separated genre names; a movie matches when it has any of them.
    pub genres: Option<String>,
    pub year_min: Option<i16>,
    pub year_max: Option<i16>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl MovieListParams {
    pub fn filter(&self) -> Result<MovieFilter> {
        let genres = self
            .genres
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let filter = MovieFilter {
            genres,
            year_min: self.year_min,
            year_max: self.year_max,
        };
        filter.validate()?;
        Ok(filter)
    }

    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Public movie list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub genres: Vec<String>,
    pub year_min: Option<i16>,
    pub year_max: Option<i16>,
}

impl MovieFilter {
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.year_min, self.year_max)
            && min > max
        {
            return Err(CatalogError::invalid_field(
                "year_min",
                format!("Must not be greater than year_max ({max})."),
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.year_min.is_none() && self.year_max.is_none()
    }

    pub fn matches_year(&self, year: i16) -> bool {
        self.year_min.is_none_or(|min| year >= min) && self.year_max.is_none_or(|max| year <= max)
    }

    /// Genre match against the names of a movie's genres.
    pub fn matches_genres<'a>(&self, mut names: impl Iterator<Item = &'a str>) -> bool {
        self.genres.is_empty() || names.any(|name| self.genres.iter().any(|g| g == name))
    }

    /// Filter pairs as they appear in the query string, for pagination links.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.genres.is_empty() {
            pairs.push(("genres", self.genres.join(",")));
        }
        if let Some(min) = self.year_min {
            pairs.push(("year_min", min.to_string()));
        }
        if let Some(max) = self.year_max {
            pairs.push(("year_max", max.to_string()));
        }
        pairs
    }
}
