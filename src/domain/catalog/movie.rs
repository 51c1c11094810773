//! Movie snapshot and its embedded director/genre records.
//!
//! Field names follow the FlickPick API's PascalCase JSON.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::MovieId;

/// A movie as returned by the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: MovieId,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Year", default)]
    pub year: Option<i32>,

    #[serde(rename = "ImagePath", default)]
    pub image_path: String,

    #[serde(rename = "Featured", default)]
    pub featured: bool,

    #[serde(rename = "Director")]
    pub director: Director,

    #[serde(rename = "Genre")]
    pub genre: Genre,
}

/// Director record, embedded in a movie and returned by `GET /directors/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Bio", default)]
    pub bio: String,

    #[serde(rename = "BirthYear", default)]
    pub birth_year: Option<i32>,

    /// `None` while the director is alive.
    #[serde(rename = "DeathYear", default)]
    pub death_year: Option<i32>,

    /// Titles the server lists for this director, if any.
    #[serde(rename = "Movies", default, skip_serializing_if = "Vec::is_empty")]
    pub movies: Vec<String>,
}

/// Genre record, embedded in a movie and returned by `GET /genres/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description", default)]
    pub description: String,
}

impl Director {
    /// Creates a director record with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: String::new(),
            birth_year: None,
            death_year: None,
            movies: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_year.is_none()
    }
}

impl Genre {
    /// Creates a genre record with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

impl Movie {
    /// Creates a minimal movie, mainly for tests and fixtures.
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        director: Director,
        genre: Genre,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            year: None,
            image_path: String::new(),
            featured: false,
            director,
            genre,
        }
    }

    /// Sets the synopsis text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
