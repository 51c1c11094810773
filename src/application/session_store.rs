//! SessionStore - Owner of the authenticated session.
//!
//! Holds the token and profile in memory and mirrors them to a
//! [`SessionStorage`]. Reads are synchronous snapshots; writes go through a
//! single writer gate so that the in-memory value and the persisted value
//! change in the same order.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::foundation::{MovieId, UserName};
use crate::domain::user::{BearerToken, FavoriteSet, Profile, ProfilePatch, Session};
use crate::ports::{SessionStorage, StorageError, TokenSource, TOKEN_KEY, USER_KEY};

/// Errors from session writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no user is logged in")]
    NotAuthenticated,

    /// A different user logged in while the change was pending.
    #[error("session no longer belongs to {expected}")]
    ProfileChanged { expected: UserName },

    /// The in-memory session was updated but could not be persisted.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Process-wide session state, shared via `Arc`.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
    writer: Mutex<()>,
}

impl SessionStore {
    /// Creates a store with an empty session. Call [`initialize`](Self::initialize)
    /// to restore a persisted one.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(Session::empty()),
            writer: Mutex::new(()),
        }
    }

    /// Restores the persisted session.
    ///
    /// Missing or unreadable data yields the empty session.
    pub async fn initialize(&self) -> Session {
        let _gate = self.writer.lock().await;

        let restored = match self.load_persisted().await {
            Ok(Some(session)) => {
                tracing::info!(
                    user = %session.profile().map(|p| p.name().as_str()).unwrap_or_default(),
                    "Restored persisted session"
                );
                session
            }
            Ok(None) => {
                tracing::debug!("No persisted session");
                Session::empty()
            }
            Err(error) => {
                tracing::warn!(error = %error, "Ignoring unreadable persisted session");
                Session::empty()
            }
        };

        *self.write_state() = restored.clone();
        restored
    }

    /// Replaces any prior session with `token` and `profile`.
    pub async fn establish(&self, token: BearerToken, profile: Profile) -> Result<(), SessionError> {
        let _gate = self.writer.lock().await;

        let user = serialize_profile(&profile)?;
        let name = profile.name().clone();
        *self.write_state() = Session::authenticated(token.clone(), profile);

        self.storage
            .set_many(&[(TOKEN_KEY, token.expose().to_string()), (USER_KEY, user)])
            .await?;

        tracing::info!(user = %name, "Session established");
        Ok(())
    }

    /// Merges the non-favorite fields of `patch` into the profile.
    ///
    /// Local only; returns the merged profile.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<Profile, SessionError> {
        let _gate = self.writer.lock().await;

        let profile = {
            let mut state = self.write_state();
            let profile = state.profile_mut().ok_or(SessionError::NotAuthenticated)?;
            profile.apply_patch(patch);
            profile.clone()
        };

        self.persist_profile(&profile).await?;
        Ok(profile)
    }

    /// Swaps in a freshly fetched profile, favorites included, keeping the token.
    pub async fn replace_profile(&self, profile: Profile) -> Result<(), SessionError> {
        let _gate = self.writer.lock().await;

        {
            let mut state = self.write_state();
            let current = state.profile_mut().ok_or(SessionError::NotAuthenticated)?;
            *current = profile.clone();
        }

        self.persist_profile(&profile).await
    }

    /// Forgets the session in memory and in storage. Idempotent.
    pub async fn clear(&self) -> Result<(), SessionError> {
        let _gate = self.writer.lock().await;

        let was_authenticated = {
            let mut state = self.write_state();
            let was = state.is_authenticated();
            *state = Session::empty();
            was
        };

        self.storage.clear().await?;

        if was_authenticated {
            tracing::info!("Session cleared");
        }
        Ok(())
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.read_state().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.read_state().profile().cloned()
    }

    /// False when logged out.
    pub fn is_favorite(&self, movie_id: &MovieId) -> bool {
        self.read_state().is_favorite(movie_id)
    }

    /// Empty when logged out.
    pub fn favorites(&self) -> FavoriteSet {
        self.read_state()
            .profile()
            .map(|p| p.favorite_movie_ids().clone())
            .unwrap_or_default()
    }

    /// Applies a confirmed favorite change of `owner` to the current
    /// favorites and persists the result.
    ///
    /// The new set is computed from the favorites held at the time of the
    /// call, so changes to other ids made meanwhile are kept. Nothing is
    /// written when `owner` is no longer the logged-in user.
    pub(crate) async fn record_favorite(
        &self,
        owner: &UserName,
        movie_id: &MovieId,
        is_favorite: bool,
    ) -> Result<FavoriteSet, SessionError> {
        let _gate = self.writer.lock().await;

        let profile = {
            let mut state = self.write_state();
            let profile = state.profile_mut().ok_or(SessionError::NotAuthenticated)?;
            if profile.name() != owner {
                return Err(SessionError::ProfileChanged {
                    expected: owner.clone(),
                });
            }
            let current = profile.favorite_movie_ids();
            let updated = if is_favorite {
                current.with(movie_id.clone())
            } else {
                current.without(movie_id)
            };
            profile.replace_favorites(updated);
            profile.clone()
        };

        self.persist_profile(&profile).await?;
        Ok(profile.favorite_movie_ids().clone())
    }

    async fn persist_profile(&self, profile: &Profile) -> Result<(), SessionError> {
        let user = serialize_profile(profile)?;
        self.storage.set(USER_KEY, user).await?;
        Ok(())
    }

    async fn load_persisted(&self) -> Result<Option<Session>, StorageError> {
        let token = self.storage.get(TOKEN_KEY).await?;
        let user = self.storage.get(USER_KEY).await?;

        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(user)) => {
                let token = BearerToken::new(token)
                    .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;
                let profile: Profile = serde_json::from_str(&user)
                    .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;
                Ok(Some(Session::authenticated(token, profile)))
            }
            (Some(_), None) => Err(StorageError::DeserializationFailed(
                "token stored without a profile".to_string(),
            )),
            (None, Some(_)) => Err(StorageError::DeserializationFailed(
                "profile stored without a token".to_string(),
            )),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenSource for SessionStore {
    fn bearer_token(&self) -> Option<BearerToken> {
        self.read_state().token().cloned()
    }
}

fn serialize_profile(profile: &Profile) -> Result<String, StorageError> {
    serde_json::to_string(profile).map_err(|e| StorageError::SerializationFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStorage;

    fn ana() -> Profile {
        Profile::new(UserName::new("ana").unwrap(), "ana@example.com")
    }

    fn id(s: &str) -> MovieId {
        MovieId::new(s).unwrap()
    }

    fn ana_name() -> UserName {
        UserName::new("ana").unwrap()
    }

    fn token() -> BearerToken {
        BearerToken::new("tok").unwrap()
    }

    fn store_with(storage: &InMemorySessionStorage) -> SessionStore {
        SessionStore::new(Arc::new(storage.clone()))
    }

    async fn persisted_profile(storage: &InMemorySessionStorage) -> Option<Profile> {
        storage
            .get(USER_KEY)
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[tokio::test]
    async fn initialize_restores_persisted_session() {
        let user = serde_json::json!({ "Name": "ana", "FavoriteMovies": ["m1"] }).to_string();
        let storage = InMemorySessionStorage::with_entries([(TOKEN_KEY, "tok".to_string()), (USER_KEY, user)]);
        let store = store_with(&storage);

        let session = store.initialize().await;

        assert!(session.is_authenticated());
        assert!(store.is_favorite(&id("m1")));
        assert_eq!(store.bearer_token().map(|t| t.expose().to_string()), Some("tok".to_string()));
    }

    #[tokio::test]
    async fn initialize_with_nothing_stored_is_empty() {
        let store = store_with(&InMemorySessionStorage::new());
        assert!(!store.initialize().await.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_treats_malformed_user_as_logged_out() {
        let storage = InMemorySessionStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]);
        let store = store_with(&storage);

        assert_eq!(store.initialize().await, Session::empty());
        assert!(store.bearer_token().is_none());
    }

    #[tokio::test]
    async fn initialize_treats_token_without_profile_as_logged_out() {
        let storage = InMemorySessionStorage::with_entries([(TOKEN_KEY, "tok")]);
        let store = store_with(&storage);

        assert!(!store.initialize().await.is_authenticated());
    }

    #[tokio::test]
    async fn establish_persists_token_and_profile() {
        let storage = InMemorySessionStorage::new();
        let store = store_with(&storage);

        store.establish(token(), ana()).await.unwrap();

        assert!(store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok"));
        assert_eq!(persisted_profile(&storage).await, Some(ana()));
    }

    #[tokio::test]
    async fn update_profile_requires_session() {
        let store = store_with(&InMemorySessionStorage::new());
        let result = store.update_profile(&ProfilePatch::new().with_email("x@y.z")).await;
        assert_eq!(result, Err(SessionError::NotAuthenticated));
    }

    #[tokio::test]
    async fn update_profile_keeps_favorites() {
        let storage = InMemorySessionStorage::new();
        let store = store_with(&storage);
        let favorites: FavoriteSet = [id("m1")].into_iter().collect();
        store.establish(token(), ana().with_favorites(favorites.clone())).await.unwrap();

        let merged = store
            .update_profile(&ProfilePatch::new().with_email("new@example.com"))
            .await
            .unwrap();

        assert_eq!(merged.email(), "new@example.com");
        assert_eq!(store.favorites(), favorites);
        assert_eq!(persisted_profile(&storage).await.unwrap().email(), "new@example.com");
    }

    #[tokio::test]
    async fn replace_profile_swaps_favorites_and_keeps_token() {
        let store = store_with(&InMemorySessionStorage::new());
        store.establish(token(), ana()).await.unwrap();

        let fresh = ana().with_favorites([id("m9")].into_iter().collect());
        store.replace_profile(fresh).await.unwrap();

        assert!(store.is_favorite(&id("m9")));
        assert_eq!(store.bearer_token(), Some(token()));
    }

    #[tokio::test]
    async fn clear_twice_matches_clear_once() {
        let storage = InMemorySessionStorage::new();
        let store = store_with(&storage);
        store.establish(token(), ana()).await.unwrap();

        store.clear().await.unwrap();
        let once = store.current();
        store.clear().await.unwrap();

        assert_eq!(store.current(), once);
        assert_eq!(once, Session::empty());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn record_favorite_applies_to_current_set() {
        let storage = InMemorySessionStorage::new();
        let store = store_with(&storage);
        store
            .establish(token(), ana().with_favorites([id("m1")].into_iter().collect()))
            .await
            .unwrap();

        let added = store.record_favorite(&ana_name(), &id("m2"), true).await.unwrap();
        assert!(added.contains(&id("m1")) && added.contains(&id("m2")));

        let removed = store.record_favorite(&ana_name(), &id("m1"), false).await.unwrap();
        assert_eq!(removed, [id("m2")].into_iter().collect());
        assert_eq!(
            persisted_profile(&storage).await.unwrap().favorite_movie_ids(),
            &removed
        );
    }

    #[tokio::test]
    async fn record_favorite_ignores_change_for_another_user() {
        let storage = InMemorySessionStorage::new();
        let store = store_with(&storage);
        let bob = Profile::new(UserName::new("bob").unwrap(), "bob@example.com");
        store.establish(token(), bob.clone()).await.unwrap();

        let result = store.record_favorite(&ana_name(), &id("m1"), true).await;

        assert_eq!(
            result,
            Err(SessionError::ProfileChanged {
                expected: ana_name()
            })
        );
        assert!(!store.is_favorite(&id("m1")));
        assert_eq!(persisted_profile(&storage).await, Some(bob));
    }

    #[tokio::test]
    async fn storage_failure_keeps_new_value_in_memory() {
        let storage = InMemorySessionStorage::new();
        let store = store_with(&storage);
        store.establish(token(), ana()).await.unwrap();
        storage.fail_writes(true);

        let result = store.record_favorite(&ana_name(), &id("m1"), true).await;

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert!(store.is_favorite(&id("m1")));
    }
}
