//! Catalog logic for the Marquee movie API.
//!
//! `marquee-core` owns everything below HTTP: request payload validation,
//! movie filters and pagination, threaded review rendering, repository ports
//! with their PostgreSQL adapters, and the [`application::CatalogService`]
//! that ties them together.
//!
//! ```no_run
//! # #[cfg(feature = "database")]
//! # async fn run() -> Result<(), marquee_core::CatalogError> {
//! use std::sync::Arc;
//! use marquee_core::application::{AppUnitOfWork, CatalogService, CatalogSettings};
//! use marquee_core::database::PostgresDatabase;
//! use marquee_core::query::MovieListParams;
//!
//! let db = Arc::new(PostgresDatabase::connect("postgres://localhost/marquee", 5).await?);
//! db.migrate().await?;
//! let uow = AppUnitOfWork::from_postgres(db).map_err(marquee_core::CatalogError::Internal)?;
//! let catalog = CatalogService::new(uow, CatalogSettings::default());
//!
//! let page = catalog.list_movies("127.0.0.1", &MovieListParams::default()).await?;
//! println!("{} public movies", page.count);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Route constants, request payloads and response envelopes
pub mod api;

/// Use cases and repository composition
pub mod application;

/// Repository ports and PostgreSQL adapters
pub mod database;

/// Review thread rendering
pub mod domain;

/// Error types shared by every layer
pub mod error;

/// Movie filters and pagination
pub mod query;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{CatalogError, FieldErrors, Result};
