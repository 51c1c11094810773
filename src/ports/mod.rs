//! Ports - Interfaces between the application core and the outside world.
//!
//! - `MovieGateway` / `TokenSource` - the remote FlickPick API
//! - `SessionStorage` - persisted token and profile

mod movie_gateway;
mod session_storage;

pub use movie_gateway::{
    Credentials, GatewayError, LoginResponse, MovieGateway, Registration, TokenSource,
};
pub use session_storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};
