//! API-facing facade (transport DTOs and routes).

pub mod requests;
pub mod responses;
pub mod routes;
