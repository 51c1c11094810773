//! Favorites handlers.

mod toggle_favorite;

pub use toggle_favorite::{
    FavoriteAction, FavoriteSyncError, ToggleFavoriteCommand, ToggleFavoriteHandler,
    ToggleFavoriteResult,
};
