//! Inbound payloads. Every field is optional at the serde level so that a
//! missing field is reported by validation alongside all other offending
//! fields instead of aborting deserialization at the first one.

use chrono::{NaiveDate, Utc};
use marquee_model::{
    ActorId, ActorRole, CategoryId, GenreId, MovieId, ReviewId, Star,
};
use serde::Deserialize;
use validator::Validate;

use crate::database::ports::{
    actors::NewActor, movies::NewMovie, ratings::NewRating, reviews::NewReview,
};
use crate::error::{CatalogError, FieldErrors, Result};

const REQUIRED: &str = "This field is required.";

fn required<T>(errors: &mut FieldErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

// Text fields are stored trimmed, so whitespace-only input fails `length(min = 1)`.
fn trim_whitespace(value: &mut Option<String>) {
    if let Some(text) = value {
        let trimmed = text.trim();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Must be at most 254 characters.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 5000, message = "Must be between 1 and 5000 characters.")
    )]
    pub text: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub movie: Option<MovieId>,
    pub parent: Option<ReviewId>,
}

impl CreateReviewRequest {
    pub fn into_new_review(mut self) -> Result<NewReview> {
        trim_whitespace(&mut self.name);
        trim_whitespace(&mut self.email);
        trim_whitespace(&mut self.text);
        self.validate()?;
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", self.name);
        let email = required(&mut errors, "email", self.email);
        let text = required(&mut errors, "text", self.text);
        let movie = required(&mut errors, "movie", self.movie);
        match (name, email, text, movie) {
            (Some(name), Some(email), Some(text), Some(movie)) => Ok(NewReview {
                name,
                email,
                text,
                movie,
                parent: self.parent,
            }),
            _ => Err(CatalogError::Validation(errors)),
        }
    }
}

/// Rating submission. Any `ip` supplied in the body is ignored; the client
/// identity always comes from the connection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateRatingRequest {
    #[validate(
        required(message = "This field is required."),
        range(min = 1, max = 5, message = "Must be between 1 and 5.")
    )]
    pub star: Option<i64>,
    #[validate(required(message = "This field is required."))]
    pub movie: Option<MovieId>,
}

impl CreateRatingRequest {
    pub fn into_new_rating(self, ip: impl Into<String>) -> Result<NewRating> {
        self.validate()?;
        let mut errors = FieldErrors::new();
        let star = required(&mut errors, "star", self.star);
        let movie = required(&mut errors, "movie", self.movie);
        let star = match star.map(Star::new) {
            Some(Ok(star)) => Some(star),
            Some(Err(err)) => {
                errors.add("star", err.to_string());
                None
            }
            None => None,
        };
        match (star, movie) {
            (Some(star), Some(movie)) => Ok(NewRating {
                ip: ip.into(),
                star,
                movie,
            }),
            _ => Err(CatalogError::Validation(errors)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters.")
    )]
    pub title: Option<String>,
    #[validate(length(max = 100, message = "Must be at most 100 characters."))]
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub poster: Option<String>,
    #[validate(range(min = 1888, max = 2200, message = "Must be a plausible release year."))]
    pub year: Option<i16>,
    #[validate(length(max = 30, message = "Must be at most 30 characters."))]
    pub country: Option<String>,
    #[serde(default)]
    pub directors: Vec<ActorId>,
    #[serde(default)]
    pub actors: Vec<ActorId>,
    #[serde(default)]
    pub genres: Vec<GenreId>,
    pub world_premiere: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Must be zero or positive."))]
    pub budget: Option<i64>,
    #[validate(range(min = 0, message = "Must be zero or positive."))]
    pub fees_in_usa: Option<i64>,
    #[validate(range(min = 0, message = "Must be zero or positive."))]
    pub fees_in_world: Option<i64>,
    pub category: Option<CategoryId>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 130, message = "Must be between 1 and 130 characters.")
    )]
    pub url: Option<String>,
    pub draft: Option<bool>,
}

impl CreateMovieRequest {
    pub fn into_new_movie(mut self) -> Result<NewMovie> {
        trim_whitespace(&mut self.title);
        trim_whitespace(&mut self.tagline);
        trim_whitespace(&mut self.country);
        trim_whitespace(&mut self.url);
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        if let Some(url) = self.url.as_deref()
            && !url.is_empty()
            && !is_slug(url)
        {
            errors.add(
                "url",
                "Use only letters, numbers, underscores or hyphens.",
            );
        }
        errors.into_result()?;

        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", self.title);
        let url = required(&mut errors, "url", self.url);
        let (Some(title), Some(url)) = (title, url) else {
            return Err(CatalogError::Validation(errors));
        };

        Ok(NewMovie {
            title,
            tagline: self.tagline.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            poster: self.poster.unwrap_or_default(),
            year: self.year.unwrap_or(DEFAULT_YEAR),
            country: self.country.unwrap_or_default(),
            directors: dedup(self.directors),
            actors: dedup(self.actors),
            genres: dedup(self.genres),
            world_premiere: self
                .world_premiere
                .unwrap_or_else(|| Utc::now().date_naive()),
            budget: self.budget.unwrap_or(0),
            fees_in_usa: self.fees_in_usa.unwrap_or(0),
            fees_in_world: self.fees_in_world.unwrap_or(0),
            category: self.category,
            url,
            draft: self.draft.unwrap_or(false),
        })
    }
}

const DEFAULT_YEAR: i16 = 2019;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateActorRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Must be between 0 and 150."))]
    pub age: Option<i16>,
    pub role: Option<ActorRole>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl CreateActorRequest {
    pub fn into_new_actor(mut self) -> Result<NewActor> {
        trim_whitespace(&mut self.name);
        self.validate()?;
        let Some(name) = self.name else {
            return Err(CatalogError::invalid_field("name", REQUIRED));
        };
        Ok(NewActor {
            name,
            age: self.age.unwrap_or(0),
            role: self.role.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
        })
    }
}

fn is_slug(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn dedup<T: PartialEq + Copy>(ids: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review_body(value: serde_json::Value) -> CreateReviewRequest {
        serde_json::from_value(value).expect("payload deserializes")
    }

    #[test]
    fn review_missing_fields_are_all_reported() {
        let err = review_body(json!({"text": "Great"}))
            .into_new_review()
            .unwrap_err();
        let CatalogError::Validation(fields) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            fields.fields().collect::<Vec<_>>(),
            vec!["email", "movie", "name"]
        );
    }

    #[test]
    fn review_rejects_bad_email() {
        let err = review_body(json!({
            "name": "Ann",
            "email": "not-an-address",
            "text": "Great",
            "movie": 1
        }))
        .into_new_review()
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("email")));
    }

    #[test]
    fn review_blank_name_and_text_are_rejected() {
        let err = review_body(json!({
            "name": "   ",
            "email": "ann@example.com",
            "text": "\n\t",
            "movie": 1
        }))
        .into_new_review()
        .unwrap_err();
        let CatalogError::Validation(fields) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["name", "text"]);
    }

    #[test]
    fn review_text_is_stored_trimmed() {
        let review = review_body(json!({
            "name": "  Ann ",
            "email": " ann@example.com ",
            "text": " Agreed\n",
            "movie": 1
        }))
        .into_new_review()
        .expect("valid review");
        assert_eq!(review.name, "Ann");
        assert_eq!(review.email, "ann@example.com");
        assert_eq!(review.text, "Agreed");
    }

    #[test]
    fn blank_movie_title_and_actor_name_are_rejected() {
        let request: CreateMovieRequest =
            serde_json::from_value(json!({"title": "  ", "url": "stalker"})).unwrap();
        let err = request.into_new_movie().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("title")));

        let request: CreateActorRequest = serde_json::from_value(json!({"name": " "})).unwrap();
        let err = request.into_new_actor().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("name")));
    }

    #[test]
    fn review_with_parent_converts() {
        let review = review_body(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "text": "Agreed",
            "movie": 3,
            "parent": 8
        }))
        .into_new_review()
        .expect("valid review");
        assert_eq!(review.movie, MovieId(3));
        assert_eq!(review.parent, Some(ReviewId(8)));
    }

    #[test]
    fn rating_ignores_body_ip_and_uses_connection_identity() {
        let request: CreateRatingRequest =
            serde_json::from_value(json!({"star": 4, "movie": 2, "ip": "6.6.6.6"}))
                .unwrap();
        let rating = request.into_new_rating("10.0.0.5").unwrap();
        assert_eq!(rating.ip, "10.0.0.5");
        assert_eq!(rating.star.value(), 4);
    }

    #[test]
    fn rating_star_out_of_range_is_a_field_error() {
        let request: CreateRatingRequest =
            serde_json::from_value(json!({"star": 6, "movie": 2})).unwrap();
        let err = request.into_new_rating("10.0.0.5").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("star")));
    }

    #[test]
    fn movie_defaults_and_slug_check() {
        let request: CreateMovieRequest = serde_json::from_value(json!({
            "title": "Stalker",
            "url": "stalker-1979",
            "genres": [1, 1, 2]
        }))
        .unwrap();
        let movie = request.into_new_movie().unwrap();
        assert_eq!(movie.year, DEFAULT_YEAR);
        assert_eq!(movie.genres, vec![GenreId(1), GenreId(2)]);
        assert!(!movie.draft);

        let request: CreateMovieRequest = serde_json::from_value(json!({
            "title": "Stalker",
            "url": "not a slug!"
        }))
        .unwrap();
        let err = request.into_new_movie().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("url")));
    }

    #[test]
    fn actor_role_defaults_to_actor() {
        let request: CreateActorRequest =
            serde_json::from_value(json!({"name": "Monica Vitti"})).unwrap();
        let actor = request.into_new_actor().unwrap();
        assert_eq!(actor.role, ActorRole::Actor);
        assert_eq!(actor.age, 0);
    }
}
