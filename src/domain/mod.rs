//! Domain layer - Pure business logic with no external dependencies.
//!
//! - `foundation` - Identifiers, validation errors, state machine trait
//! - `catalog` - Movie, director and genre snapshots
//! - `user` - Session, profile and favorite-ID set
//! - `detail` - Detail facets and dialog lifecycle

pub mod catalog;
pub mod detail;
pub mod foundation;
pub mod user;
