//! Favorite-ID set value object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::MovieId;

/// Set of movie ids a user has marked as favorite.
///
/// Serialized as a JSON array (`FavoriteMovies`). Order carries no meaning and
/// duplicates in incoming payloads collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<MovieId>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, movie_id: &MovieId) -> bool {
        self.0.contains(movie_id)
    }

    /// Returns a new set that also contains `movie_id`.
    pub fn with(&self, movie_id: MovieId) -> Self {
        let mut ids = self.0.clone();
        ids.insert(movie_id);
        Self(ids)
    }

    /// Returns a new set without `movie_id`.
    pub fn without(&self, movie_id: &MovieId) -> Self {
        let mut ids = self.0.clone();
        ids.remove(movie_id);
        Self(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieId> {
        self.0.iter()
    }
}

impl FromIterator<MovieId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = MovieId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MovieId {
        MovieId::new(s).unwrap()
    }

    #[test]
    fn with_and_without_do_not_mutate_original() {
        let original = FavoriteSet::new();
        let added = original.with(id("m1"));

        assert!(original.is_empty());
        assert!(added.contains(&id("m1")));

        let removed = added.without(&id("m1"));
        assert!(added.contains(&id("m1")));
        assert!(removed.is_empty());
    }

    #[test]
    fn duplicates_collapse_on_deserialize() {
        let set: FavoriteSet = serde_json::from_str(r#"["m1","m2","m1"]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serializes_as_array() {
        let set: FavoriteSet = [id("b"), id("a")].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}
