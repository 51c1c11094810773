//! Mock Movie Gateway for testing.
//!
//! An in-process stand-in for the FlickPick API: it keeps a small catalog and
//! user table, applies favorite mutations to its own copy of each user, and
//! records every call.
//!
//! # Features
//!
//! - Seeded movies, directors, genres and users
//! - Error injection per operation (consumed in order)
//! - Simulated latency for interleaving tests
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockMovieGateway::new()
//!     .with_movies(vec![movie])
//!     .with_user(profile, "secret");
//!
//! gateway.fail_next(GatewayOperation::AddFavorite, GatewayError::server_fault(500, "down"));
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::catalog::{Director, Genre, Movie};
use crate::domain::foundation::{MovieId, UserName};
use crate::domain::user::{BearerToken, FavoriteSet, Profile, ProfilePatch};
use crate::ports::{Credentials, GatewayError, LoginResponse, MovieGateway, Registration};

/// Gateway operations, for error injection and call filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    Register,
    Login,
    Logout,
    ListMovies,
    GetMovie,
    GetDirector,
    GetGenre,
    GetUser,
    UpdateUser,
    DeleteUser,
    GetFavorites,
    AddFavorite,
    RemoveFavorite,
}

/// A recorded call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub operation: GatewayOperation,
    pub args: Vec<String>,
}

#[derive(Debug, Default)]
struct MockState {
    movies: Vec<Movie>,
    directors: Vec<Director>,
    genres: Vec<Genre>,
    users: HashMap<String, (String, Profile)>,
    failures: HashMap<GatewayOperation, VecDeque<GatewayError>>,
    calls: Vec<GatewayCall>,
}

/// Mock FlickPick API.
#[derive(Debug, Clone, Default)]
pub struct MockMovieGateway {
    state: Arc<Mutex<MockState>>,
    delay: Duration,
}

impl MockMovieGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog.
    pub fn with_movies(self, movies: Vec<Movie>) -> Self {
        self.lock().movies = movies;
        self
    }

    /// Adds a record served by `get_director`.
    pub fn with_director(self, director: Director) -> Self {
        self.lock().directors.push(director);
        self
    }

    /// Adds a record served by `get_genre`.
    pub fn with_genre(self, genre: Genre) -> Self {
        self.lock().genres.push(genre);
        self
    }

    /// Registers a user server-side.
    pub fn with_user(self, profile: Profile, password: impl Into<String>) -> Self {
        self.lock().users.insert(
            profile.name().as_str().to_string(),
            (password.into(), profile),
        );
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: GatewayOperation, error: GatewayError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// All calls so far, in issue order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Number of calls made for one operation.
    pub fn calls_to(&self, operation: GatewayOperation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// The server's view of a user's favorites.
    pub fn server_favorites(&self, name: &UserName) -> Option<FavoriteSet> {
        self.lock()
            .users
            .get(name.as_str())
            .map(|(_, profile)| profile.favorite_movie_ids().clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panic while holding the lock only happens inside a failing test.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the call, waits, then returns any injected failure.
    async fn enter(&self, operation: GatewayOperation, args: &[&str]) -> Result<(), GatewayError> {
        self.lock().calls.push(GatewayCall {
            operation,
            args: args.iter().map(|a| a.to_string()).collect(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self
            .lock()
            .failures
            .get_mut(&operation)
            .and_then(|queue| queue.pop_front())
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn user(&self, name: &UserName) -> Result<Profile, GatewayError> {
        self.lock()
            .users
            .get(name.as_str())
            .map(|(_, profile)| profile.clone())
            .ok_or_else(|| GatewayError::not_found(format!("users/{}", name)))
    }
}

#[async_trait]
impl MovieGateway for MockMovieGateway {
    async fn register(&self, registration: &Registration) -> Result<Profile, GatewayError> {
        self.enter(GatewayOperation::Register, &[registration.name.as_str()])
            .await?;

        let mut state = self.lock();
        if state.users.contains_key(registration.name.as_str()) {
            return Err(GatewayError::rejected(
                422,
                format!("{} already exists", registration.name),
            ));
        }

        let mut profile = Profile::new(registration.name.clone(), registration.email.clone())
            .with_id(format!("u-{}", state.users.len() + 1));
        if let Some(birthday) = registration.birthday {
            profile = profile.with_birthday(birthday);
        }
        state.users.insert(
            registration.name.as_str().to_string(),
            (registration.password().to_string(), profile.clone()),
        );
        Ok(profile)
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        self.enter(GatewayOperation::Login, &[credentials.name.as_str()])
            .await?;

        let state = self.lock();
        match state.users.get(credentials.name.as_str()) {
            Some((password, profile)) if password == credentials.password() => {
                let token = BearerToken::new(format!("token-{}", credentials.name))
                    .map_err(|e| GatewayError::server_fault(500, e.to_string()))?;
                Ok(LoginResponse {
                    token,
                    user: profile.clone(),
                })
            }
            _ => Err(GatewayError::Unauthorized),
        }
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.enter(GatewayOperation::Logout, &[]).await
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, GatewayError> {
        self.enter(GatewayOperation::ListMovies, &[]).await?;
        Ok(self.lock().movies.clone())
    }

    async fn get_movie(&self, title: &str) -> Result<Movie, GatewayError> {
        self.enter(GatewayOperation::GetMovie, &[title]).await?;
        self.lock()
            .movies
            .iter()
            .find(|m| m.title == title)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("movies/{}", title)))
    }

    async fn get_director(&self, name: &str) -> Result<Director, GatewayError> {
        self.enter(GatewayOperation::GetDirector, &[name]).await?;
        self.lock()
            .directors
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("directors/{}", name)))
    }

    async fn get_genre(&self, name: &str) -> Result<Genre, GatewayError> {
        self.enter(GatewayOperation::GetGenre, &[name]).await?;
        self.lock()
            .genres
            .iter()
            .find(|g| g.name == name)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("genres/{}", name)))
    }

    async fn get_user(&self, name: &UserName) -> Result<Profile, GatewayError> {
        self.enter(GatewayOperation::GetUser, &[name.as_str()]).await?;
        self.user(name)
    }

    async fn update_user(
        &self,
        name: &UserName,
        patch: &ProfilePatch,
    ) -> Result<Profile, GatewayError> {
        self.enter(GatewayOperation::UpdateUser, &[name.as_str()])
            .await?;

        let mut state = self.lock();
        let (password, mut profile) = state
            .users
            .remove(name.as_str())
            .ok_or_else(|| GatewayError::not_found(format!("users/{}", name)))?;

        profile.apply_patch(patch);
        let password = patch.password.clone().unwrap_or(password);
        state.users.insert(
            profile.name().as_str().to_string(),
            (password, profile.clone()),
        );
        Ok(profile)
    }

    async fn delete_user(&self, name: &UserName) -> Result<(), GatewayError> {
        self.enter(GatewayOperation::DeleteUser, &[name.as_str()])
            .await?;
        self.lock()
            .users
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| GatewayError::not_found(format!("users/{}", name)))
    }

    async fn get_favorite_movies(&self, name: &UserName) -> Result<FavoriteSet, GatewayError> {
        self.enter(GatewayOperation::GetFavorites, &[name.as_str()])
            .await?;
        self.user(name).map(|profile| profile.favorite_movie_ids().clone())
    }

    async fn add_favorite(
        &self,
        name: &UserName,
        movie_id: &MovieId,
    ) -> Result<(), GatewayError> {
        self.enter(
            GatewayOperation::AddFavorite,
            &[name.as_str(), movie_id.as_str()],
        )
        .await?;

        let mut state = self.lock();
        let (_, profile) = state
            .users
            .get_mut(name.as_str())
            .ok_or_else(|| GatewayError::not_found(format!("users/{}", name)))?;

        if profile.is_favorite(movie_id) {
            return Err(GatewayError::rejected(
                409,
                format!("{} is already a favorite", movie_id),
            ));
        }
        let favorites = profile.favorite_movie_ids().with(movie_id.clone());
        profile.replace_favorites(favorites);
        Ok(())
    }

    async fn remove_favorite(
        &self,
        name: &UserName,
        movie_id: &MovieId,
    ) -> Result<(), GatewayError> {
        self.enter(
            GatewayOperation::RemoveFavorite,
            &[name.as_str(), movie_id.as_str()],
        )
        .await?;

        let mut state = self.lock();
        let (_, profile) = state
            .users
            .get_mut(name.as_str())
            .ok_or_else(|| GatewayError::not_found(format!("users/{}", name)))?;

        if !profile.is_favorite(movie_id) {
            return Err(GatewayError::not_found(format!(
                "users/{}/movies/{}",
                name, movie_id
            )));
        }
        let favorites = profile.favorite_movie_ids().without(movie_id);
        profile.replace_favorites(favorites);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Profile {
        Profile::new(UserName::new("ana").unwrap(), "ana@example.com")
    }

    #[tokio::test]
    async fn login_checks_password() {
        let gateway = MockMovieGateway::new().with_user(ana(), "secret");

        let ok = gateway
            .login(&Credentials::new(UserName::new("ana").unwrap(), "secret"))
            .await
            .unwrap();
        assert_eq!(ok.user.name().as_str(), "ana");

        let bad = gateway
            .login(&Credentials::new(UserName::new("ana").unwrap(), "nope"))
            .await;
        assert!(matches!(bad, Err(GatewayError::Unauthorized)));
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let gateway = MockMovieGateway::new();
        gateway.fail_next(GatewayOperation::ListMovies, GatewayError::network("down"));

        assert!(gateway.list_movies().await.is_err());
        assert!(gateway.list_movies().await.is_ok());
        assert_eq!(gateway.calls_to(GatewayOperation::ListMovies), 2);
    }

    #[tokio::test]
    async fn favorites_are_tracked_server_side() {
        let gateway = MockMovieGateway::new().with_user(ana(), "secret");
        let name = UserName::new("ana").unwrap();
        let m1 = MovieId::new("m1").unwrap();

        gateway.add_favorite(&name, &m1).await.unwrap();
        assert!(gateway.server_favorites(&name).unwrap().contains(&m1));

        let again = gateway.add_favorite(&name, &m1).await;
        assert!(matches!(
            again,
            Err(GatewayError::ValidationRejected { status: 409, .. })
        ));

        gateway.remove_favorite(&name, &m1).await.unwrap();
        assert!(gateway.server_favorites(&name).unwrap().is_empty());
    }

    #[tokio::test]
    async fn favorite_movies_reflect_server_mutations() {
        let gateway = MockMovieGateway::new().with_user(ana(), "secret");
        let name = UserName::new("ana").unwrap();
        let m1 = MovieId::new("m1").unwrap();

        gateway.add_favorite(&name, &m1).await.unwrap();

        let favorites = gateway.get_favorite_movies(&name).await.unwrap();
        assert_eq!(favorites, [m1].into_iter().collect());
        assert_eq!(gateway.calls_to(GatewayOperation::GetFavorites), 1);

        let missing = gateway
            .get_favorite_movies(&UserName::new("zoe").unwrap())
            .await;
        assert!(matches!(missing, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn records_call_arguments() {
        let gateway = MockMovieGateway::new();
        let _ = gateway.get_director("Agnès Varda").await;

        assert_eq!(
            gateway.calls(),
            vec![GatewayCall {
                operation: GatewayOperation::GetDirector,
                args: vec!["Agnès Varda".to_string()],
            }]
        );
    }
}
