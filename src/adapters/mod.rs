//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `gateway` - The FlickPick REST API (and an in-process mock)
//! - `storage` - Session persistence (file, in-memory)

pub mod gateway;
pub mod storage;

pub use gateway::{MockMovieGateway, RestGatewayConfig, RestMovieGateway};
pub use storage::{FileSessionStorage, InMemorySessionStorage};
