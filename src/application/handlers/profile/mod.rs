//! Profile handlers: edit, refresh, delete.

mod delete_account;
mod refresh_profile;
mod update_profile;

pub use delete_account::DeleteAccountHandler;
pub use refresh_profile::RefreshProfileHandler;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
