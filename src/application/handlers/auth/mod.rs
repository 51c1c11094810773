//! Authentication handlers: login, registration, logout.

mod login_user;
mod logout_user;
mod register_user;

pub use login_user::{LoginCommand, LoginHandler, LoginResult};
pub use logout_user::{LogoutHandler, LogoutResult};
pub use register_user::{RegisterCommand, RegisterHandler};
