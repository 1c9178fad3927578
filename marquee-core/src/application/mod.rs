pub mod catalog;
pub mod unit_of_work;

pub use catalog::{CatalogService, CatalogSettings};
pub use unit_of_work::{AppUnitOfWork, AppUnitOfWorkBuilder};
