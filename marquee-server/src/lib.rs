//! # Marquee Server
//!
//! HTTP API for the Marquee movie catalog, built on axum over the
//! `marquee-core` repositories:
//!
//! - movie listings annotated with the mean rating and whether the calling
//!   client has rated each movie
//! - movie detail with threaded reviews
//! - one rating per client and movie, replaced on resubmission
//! - actor and director directory

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
