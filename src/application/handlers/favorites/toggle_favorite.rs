//! ToggleFavoriteHandler - Command handler for adding/removing a favorite.
//!
//! The remote call happens first; the session only changes once the server
//! has confirmed. Toggles for the same movie never overlap.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::application::{SessionError, SessionStore};
use crate::domain::foundation::MovieId;
use crate::domain::user::FavoriteSet;
use crate::ports::{GatewayError, MovieGateway};

/// Command to flip a movie's favorite status.
#[derive(Debug, Clone)]
pub struct ToggleFavoriteCommand {
    pub movie_id: MovieId,
}

/// Result of a confirmed toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFavoriteResult {
    pub movie_id: MovieId,
    /// Membership after the toggle.
    pub is_favorite: bool,
    pub favorites: FavoriteSet,
}

/// Which remote mutation a toggle issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl fmt::Display for FavoriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteAction::Add => f.write_str("add"),
            FavoriteAction::Remove => f.write_str("remove"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoriteSyncError {
    #[error("no user is logged in")]
    NotAuthenticated,

    #[error("a favorite change for movie {0} is already in progress")]
    AlreadyInFlight(MovieId),

    /// The server refused or could not be reached; the session is unchanged.
    #[error("failed to {action} favorite {movie_id}: {source}")]
    Remote {
        movie_id: MovieId,
        action: FavoriteAction,
        #[source]
        source: GatewayError,
    },

    /// Confirmed remotely, but the session could not be updated or persisted.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Handler for favorite toggles.
pub struct ToggleFavoriteHandler {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
    in_flight: Mutex<HashSet<MovieId>>,
}

impl ToggleFavoriteHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn handle(
        &self,
        cmd: ToggleFavoriteCommand,
    ) -> Result<ToggleFavoriteResult, FavoriteSyncError> {
        let profile = self
            .session
            .profile()
            .ok_or(FavoriteSyncError::NotAuthenticated)?;

        let _guard = InFlightGuard::acquire(&self.in_flight, &cmd.movie_id)?;

        let action = if profile.is_favorite(&cmd.movie_id) {
            FavoriteAction::Remove
        } else {
            FavoriteAction::Add
        };

        tracing::debug!(movie_id = %cmd.movie_id, action = %action, "Syncing favorite");

        let remote = match action {
            FavoriteAction::Add => self.gateway.add_favorite(profile.name(), &cmd.movie_id).await,
            FavoriteAction::Remove => {
                self.gateway
                    .remove_favorite(profile.name(), &cmd.movie_id)
                    .await
            }
        };

        if let Err(source) = remote {
            tracing::warn!(
                movie_id = %cmd.movie_id,
                action = %action,
                error = %source,
                "Favorite change rejected"
            );
            return Err(FavoriteSyncError::Remote {
                movie_id: cmd.movie_id,
                action,
                source,
            });
        }

        let is_favorite = action == FavoriteAction::Add;
        let favorites = self
            .session
            .record_favorite(profile.name(), &cmd.movie_id, is_favorite)
            .await?;

        Ok(ToggleFavoriteResult {
            movie_id: cmd.movie_id,
            is_favorite,
            favorites,
        })
    }
}

/// Marks a movie id as in flight until dropped.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<MovieId>>,
    movie_id: MovieId,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(
        set: &'a Mutex<HashSet<MovieId>>,
        movie_id: &MovieId,
    ) -> Result<Self, FavoriteSyncError> {
        let mut ids = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(movie_id.clone()) {
            return Err(FavoriteSyncError::AlreadyInFlight(movie_id.clone()));
        }
        Ok(Self {
            set,
            movie_id: movie_id.clone(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.movie_id);
    }
}
