//! Test doubles for the repository ports.

pub mod in_memory;

pub use in_memory::InMemoryCatalog;
