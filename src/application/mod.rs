//! Application layer - Session state, commands, and view models.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Only the [`SessionStore`] writes session state; handlers go through it.

pub mod handlers;
mod session_store;

pub use handlers::{
    // Account
    AccountError, DeleteAccountHandler, LoginCommand, LoginHandler, LoginResult, LogoutHandler,
    LogoutResult, RefreshProfileHandler, RegisterCommand, RegisterHandler, UpdateProfileCommand,
    UpdateProfileHandler,
    // Catalog and detail
    CatalogViewModel, DetailDialog, DetailError, DetailResolver, DetailView, FavoritesOnly,
    ProfileView,
    // Favorites
    FavoriteAction, FavoriteSyncError, ToggleFavoriteCommand, ToggleFavoriteHandler,
    ToggleFavoriteResult,
};
pub use session_store::{SessionError, SessionStore};
