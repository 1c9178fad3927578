//! PostgreSQL-backed repository implementations.

pub mod actors;
pub mod movies;
pub mod ratings;
pub mod reviews;

mod rows;
