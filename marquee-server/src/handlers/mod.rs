pub mod actors;
pub mod health;
pub mod movies;
pub mod ratings;
pub mod reviews;
