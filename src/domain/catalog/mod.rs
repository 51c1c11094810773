//! Catalog domain module.
//!
//! Read-only movie snapshots fetched from the remote catalog.

mod movie;

pub use movie::{Director, Genre, Movie};
