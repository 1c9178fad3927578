//! Repository ports and their PostgreSQL adapters.

pub mod ports;

#[cfg(feature = "database")]
pub mod infrastructure;
#[cfg(feature = "database")]
pub mod postgres;

#[cfg(feature = "database")]
pub use postgres::PostgresDatabase;
