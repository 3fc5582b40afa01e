//! External service clients for musicsaver

pub mod catalog;

pub use catalog::{Catalog, CatalogClient, NetworkError};
