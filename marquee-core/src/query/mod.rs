pub mod filters;
pub mod pagination;

pub use filters::{MovieFilter, MovieListParams};
pub use pagination::{Page, PageParams, PageRequest, Paged};
