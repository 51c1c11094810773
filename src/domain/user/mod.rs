//! User module - Session, profile and favorites.
//!
//! # Domain Invariants
//!
//! 1. A session holds a token and a profile together, or neither
//! 2. Favorite ids are unique; order carries no meaning
//! 3. Favorite status is decided only by `Profile::is_favorite`

mod favorites;
mod profile;
mod session;

pub use favorites::FavoriteSet;
pub use profile::{Profile, ProfilePatch};
pub use session::{BearerToken, Session};
