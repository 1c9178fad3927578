//! A single in-memory store implementing every catalog port with the same
//! observable behaviour as the PostgreSQL repositories.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use marquee_model::{
    Actor, ActorId, ActorSummary, Category, CategoryId, Genre, GenreId, Movie, MovieId,
    MovieListItem, Rating, RatingId, Review, ReviewId,
};
use tokio::sync::RwLock;

use crate::database::ports::{
    actors::{ActorRepository, NewActor},
    movies::{MovieDetailParts, MovieRepository, NewMovie},
    ratings::{NewRating, RatingRepository},
    reviews::{NewReview, ReviewRepository},
};
use crate::error::{CatalogError, FieldErrors, Result};
use crate::query::{MovieFilter, PageRequest, Paged};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    categories: BTreeMap<CategoryId, Category>,
    genres: BTreeMap<GenreId, Genre>,
    actors: BTreeMap<ActorId, Actor>,
    movies: BTreeMap<MovieId, Movie>,
    reviews: BTreeMap<ReviewId, Review>,
    ratings: BTreeMap<RatingId, Rating>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn is_public(&self, movie: MovieId) -> bool {
        self.movies.get(&movie).is_some_and(|movie| !movie.draft)
    }

    fn genre_names(&self, movie: &Movie) -> Vec<String> {
        let mut genres: Vec<&Genre> = movie
            .genres
            .iter()
            .filter_map(|id| self.genres.get(id))
            .collect();
        genres.sort_by_key(|genre| genre.id);
        genres.into_iter().map(|genre| genre.name.clone()).collect()
    }

    fn cast(&self, ids: &[ActorId]) -> Vec<Actor> {
        let mut cast: Vec<Actor> = ids.iter().filter_map(|id| self.actors.get(id).cloned()).collect();
        cast.sort_by_key(|actor| actor.id);
        cast
    }

    fn annotate(&self, movie: &Movie, client_ip: &str) -> MovieListItem {
        let ratings: Vec<&Rating> = self
            .ratings
            .values()
            .filter(|rating| rating.movie == movie.id)
            .collect();
        let total: i64 = ratings.iter().map(|rating| i64::from(rating.star)).sum();
        let count = ratings.len() as i64;

        MovieListItem {
            id: movie.id,
            title: movie.title.clone(),
            tagline: movie.tagline.clone(),
            category: movie.category,
            rating_user: ratings.iter().any(|rating| rating.ip == client_ip),
            middle_star: (count > 0).then(|| total / count),
        }
    }
}

/// Shared in-memory catalog. Clone the `Arc` into each port of a unit of
/// work.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<State>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_category(&self, name: &str) -> CategoryId {
        let mut state = self.state.write().await;
        let id = CategoryId(state.next_id());
        state.categories.insert(
            id,
            Category {
                id,
                name: name.to_string(),
                description: String::new(),
                url: name.to_lowercase(),
            },
        );
        id
    }

    pub async fn add_genre(&self, name: &str) -> GenreId {
        let mut state = self.state.write().await;
        let id = GenreId(state.next_id());
        state.genres.insert(
            id,
            Genre {
                id,
                name: name.to_string(),
                description: String::new(),
                url: name.to_lowercase(),
            },
        );
        id
    }

    /// Number of stored ratings for a movie, drafts included.
    pub async fn rating_count(&self, movie: MovieId) -> usize {
        let state = self.state.read().await;
        state
            .ratings
            .values()
            .filter(|rating| rating.movie == movie)
            .count()
    }

    pub async fn review_count(&self) -> usize {
        self.state.read().await.reviews.len()
    }
}

#[async_trait]
impl MovieRepository for InMemoryCatalog {
    async fn list_public(
        &self,
        client_ip: &str,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<Paged<MovieListItem>> {
        let state = self.state.read().await;
        let matching: Vec<&Movie> = state
            .movies
            .values()
            .filter(|movie| !movie.draft && filter.matches_year(movie.year))
            .filter(|movie| {
                let names = state.genre_names(movie);
                filter.matches_genres(names.iter().map(String::as_str))
            })
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|movie| state.annotate(movie, client_ip))
            .collect();
        Ok(Paged::new(items, total))
    }

    async fn get_public(&self, id: MovieId) -> Result<Option<MovieDetailParts>> {
        let state = self.state.read().await;
        let Some(movie) = state.movies.get(&id).filter(|movie| !movie.draft) else {
            return Ok(None);
        };

        let directors = state.cast(&movie.directors);
        let actors = state.cast(&movie.actors);
        let mut movie = movie.clone();
        movie.directors = directors.iter().map(|actor| actor.id).collect();
        movie.actors = actors.iter().map(|actor| actor.id).collect();
        movie.genres.sort();

        Ok(Some(MovieDetailParts {
            category: movie
                .category
                .and_then(|id| state.categories.get(&id))
                .map(|category| category.name.clone()),
            directors: directors.iter().map(ActorSummary::from).collect(),
            actors,
            genres: state.genre_names(&movie),
            movie,
        }))
    }

    async fn create(&self, new_movie: NewMovie) -> Result<Movie> {
        let mut state = self.state.write().await;

        let mut errors = FieldErrors::new();
        if let Some(category) = new_movie.category
            && !state.categories.contains_key(&category)
        {
            errors.add_missing("category", category);
        }
        for genre in new_movie.genres.iter().filter(|id| !state.genres.contains_key(*id)) {
            errors.add_missing("genres", genre);
        }
        for (field, cast) in [("directors", &new_movie.directors), ("actors", &new_movie.actors)] {
            for actor in cast.iter().filter(|id| !state.actors.contains_key(*id)) {
                errors.add_missing(field, actor);
            }
        }
        errors.into_result()?;

        if state.movies.values().any(|movie| movie.url == new_movie.url) {
            return Err(CatalogError::invalid_field(
                "url",
                "movie with this url already exists.",
            ));
        }

        let id = MovieId(state.next_id());
        let movie = Movie {
            id,
            title: new_movie.title,
            tagline: new_movie.tagline,
            description: new_movie.description,
            poster: new_movie.poster,
            year: new_movie.year,
            country: new_movie.country,
            directors: new_movie.directors,
            actors: new_movie.actors,
            genres: new_movie.genres,
            world_premiere: new_movie.world_premiere,
            budget: new_movie.budget,
            fees_in_usa: new_movie.fees_in_usa,
            fees_in_world: new_movie.fees_in_world,
            category: new_movie.category,
            url: new_movie.url,
            draft: new_movie.draft,
        };
        state.movies.insert(id, movie.clone());
        Ok(movie)
    }
}

#[async_trait]
impl ActorRepository for InMemoryCatalog {
    async fn list(&self, page: PageRequest) -> Result<Paged<ActorSummary>> {
        let state = self.state.read().await;
        let items = state
            .actors
            .values()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(ActorSummary::from)
            .collect();
        Ok(Paged::new(items, state.actors.len() as u64))
    }

    async fn get(&self, id: ActorId) -> Result<Option<Actor>> {
        Ok(self.state.read().await.actors.get(&id).cloned())
    }

    async fn create(&self, actor: NewActor) -> Result<Actor> {
        let mut state = self.state.write().await;
        let id = ActorId(state.next_id());
        let actor = Actor {
            id,
            name: actor.name,
            age: actor.age,
            role: actor.role,
            description: actor.description,
            image: actor.image,
        };
        state.actors.insert(id, actor.clone());
        Ok(actor)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryCatalog {
    async fn create(&self, review: NewReview) -> Result<Review> {
        let mut state = self.state.write().await;

        let mut errors = FieldErrors::new();
        if !state.is_public(review.movie) {
            errors.add_missing("movie", review.movie);
        }
        if let Some(parent) = review.parent {
            match state.reviews.get(&parent) {
                None => errors.add_missing("parent", parent),
                Some(existing) if existing.movie != review.movie => {
                    errors.add("parent", "Parent review belongs to a different movie.")
                }
                Some(_) => {}
            }
        }
        errors.into_result()?;

        let id = ReviewId(state.next_id());
        let review = Review {
            id,
            name: review.name,
            email: review.email,
            text: review.text,
            movie: review.movie,
            parent: review.parent,
            created_at: Utc::now(),
        };
        state.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn list_for_movie(&self, movie: MovieId) -> Result<Vec<Review>> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .values()
            .filter(|review| review.movie == movie)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RatingRepository for InMemoryCatalog {
    async fn upsert(&self, rating: NewRating) -> Result<Rating> {
        let mut state = self.state.write().await;
        if !state.is_public(rating.movie) {
            let mut errors = FieldErrors::new();
            errors.add_missing("movie", rating.movie);
            return Err(CatalogError::Validation(errors));
        }

        if let Some(existing) = state
            .ratings
            .values_mut()
            .find(|existing| existing.ip == rating.ip && existing.movie == rating.movie)
        {
            existing.star = rating.star;
            return Ok(existing.clone());
        }

        let id = RatingId(state.next_id());
        let stored = Rating {
            id,
            ip: rating.ip,
            star: rating.star,
            movie: rating.movie,
        };
        state.ratings.insert(id, stored.clone());
        Ok(stored)
    }
}
