//! RegisterHandler - Creates an account.
//!
//! Registration does not log the user in.

use std::sync::Arc;

use crate::application::handlers::AccountError;
use crate::domain::user::Profile;
use crate::ports::{MovieGateway, Registration};

/// Command to create an account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub registration: Registration,
}

/// Handler for account creation.
pub struct RegisterHandler {
    gateway: Arc<dyn MovieGateway>,
}

impl RegisterHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>) -> Self {
        Self { gateway }
    }

    /// Returns the profile created by the server.
    pub async fn handle(&self, cmd: RegisterCommand) -> Result<Profile, AccountError> {
        let profile = self.gateway.register(&cmd.registration).await?;
        tracing::info!(user = %profile.name(), "Account registered");
        Ok(profile)
    }
}
