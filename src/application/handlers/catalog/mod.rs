//! Catalog view model.

mod catalog_view_model;

pub use catalog_view_model::{CatalogViewModel, FavoritesOnly, ProfileView};
