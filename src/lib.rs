//! FlickPick - Client core for the FlickPick movie catalog
//!
//! Session persistence, favorites synchronization, the catalog view model
//! and the movie detail dialog, on top of the FlickPick REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
