//! Facets a movie detail dialog can show.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::catalog::{Director, Genre, Movie};

/// Kind of detail requested for a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Director,
    Genre,
    Synopsis,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Director => "director",
            Facet::Genre => "genre",
            Facet::Synopsis => "synopsis",
        }
    }

    /// True when the facet is answered from the movie itself.
    pub fn is_local(&self) -> bool {
        matches!(self, Facet::Synopsis)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A facet name outside {director, genre, synopsis}.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown detail facet '{0}'")]
pub struct UnknownFacet(pub String);

impl FromStr for Facet {
    type Err = UnknownFacet;

    /// Only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "director" => Ok(Facet::Director),
            "genre" => Ok(Facet::Genre),
            "synopsis" => Ok(Facet::Synopsis),
            _ => Err(UnknownFacet(s.to_string())),
        }
    }
}

/// Transient request for one facet of one movie.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRequest {
    pub facet: Facet,
    pub movie: Movie,
}

impl DetailRequest {
    pub fn new(facet: Facet, movie: Movie) -> Self {
        Self { facet, movie }
    }
}

/// Resolved content of a detail dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPayload {
    Director(Director),
    Genre(Genre),
    Synopsis(Movie),
}

impl DetailPayload {
    pub fn facet(&self) -> Facet {
        match self {
            DetailPayload::Director(_) => Facet::Director,
            DetailPayload::Genre(_) => Facet::Genre,
            DetailPayload::Synopsis(_) => Facet::Synopsis,
        }
    }
}
