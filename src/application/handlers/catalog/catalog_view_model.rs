//! CatalogViewModel - The movie list and its favorites filter.

use std::sync::{Arc, PoisonError, RwLock};

use crate::application::SessionStore;
use crate::domain::catalog::Movie;
use crate::domain::foundation::MovieId;
use crate::domain::user::{FavoriteSet, Profile};
use crate::ports::{GatewayError, MovieGateway};

/// Holds the fetched catalog and answers favorite questions against the
/// session.
pub struct CatalogViewModel {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
    movies: RwLock<Arc<Vec<Movie>>>,
}

impl CatalogViewModel {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            movies: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Fetches the full catalog and replaces the held one.
    ///
    /// On failure the previous catalog is kept. Returns the number of movies.
    pub async fn load(&self) -> Result<usize, GatewayError> {
        let movies = self.gateway.list_movies().await.map_err(|error| {
            tracing::warn!(error = %error, "Failed to load catalog");
            error
        })?;

        let count = movies.len();
        *self.movies.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(movies);

        tracing::debug!(count, "Catalog loaded");
        Ok(count)
    }

    /// Snapshot of the held catalog, in server order.
    pub fn movies(&self) -> Arc<Vec<Movie>> {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.movies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies().is_empty()
    }

    pub fn find_by_id(&self, movie_id: &MovieId) -> Option<Movie> {
        self.movies().iter().find(|m| &m.id == movie_id).cloned()
    }

    /// Whether `movie` is in the logged-in user's favorites.
    pub fn is_favorite(&self, movie: &Movie) -> bool {
        self.session.is_favorite(&movie.id)
    }

    /// The catalog filtered to favorites, as of now.
    pub fn favorites_only(&self) -> FavoritesOnly {
        FavoritesOnly {
            movies: self.movies(),
            favorites: self.session.favorites(),
        }
    }

    /// The profile page: who is logged in and their favorite movies.
    ///
    /// `None` when logged out.
    pub fn profile_view(&self) -> Option<ProfileView> {
        let profile = self.session.profile()?;
        let favorite_movies = self.favorites_only().iter().cloned().collect();
        Some(ProfileView {
            profile,
            favorite_movies,
        })
    }
}

/// Favorites filter over one catalog snapshot.
///
/// Iterating is lazy and may be repeated; each pass yields the same movies in
/// catalog order.
#[derive(Debug, Clone)]
pub struct FavoritesOnly {
    movies: Arc<Vec<Movie>>,
    favorites: FavoriteSet,
}

impl FavoritesOnly {
    pub fn iter(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.movies
            .iter()
            .filter(move |m| self.favorites.contains(&m.id))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> IntoIterator for &'a FavoritesOnly {
    type Item = &'a Movie;
    type IntoIter = Box<dyn Iterator<Item = &'a Movie> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Profile page model.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub profile: Profile,
    pub favorite_movies: Vec<Movie>,
}
