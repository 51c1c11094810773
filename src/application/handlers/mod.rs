//! Application handlers.
//!
//! Command handlers and view models that orchestrate the session store and
//! the movie gateway.

mod account_error;
pub mod auth;
pub mod catalog;
pub mod detail;
pub mod favorites;
pub mod profile;

pub use account_error::AccountError;
pub use auth::{
    LoginCommand, LoginHandler, LoginResult, LogoutHandler, LogoutResult, RegisterCommand,
    RegisterHandler,
};
pub use catalog::{CatalogViewModel, FavoritesOnly, ProfileView};
pub use detail::{DetailDialog, DetailError, DetailResolver, DetailView};
pub use favorites::{
    FavoriteAction, FavoriteSyncError, ToggleFavoriteCommand, ToggleFavoriteHandler,
    ToggleFavoriteResult,
};
pub use profile::{
    DeleteAccountHandler, RefreshProfileHandler, UpdateProfileCommand, UpdateProfileHandler,
};
