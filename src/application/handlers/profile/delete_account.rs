//! DeleteAccountHandler - Deletes the account and ends the session.

use std::sync::Arc;

use crate::application::handlers::AccountError;
use crate::application::SessionStore;
use crate::ports::MovieGateway;

pub struct DeleteAccountHandler {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
}

impl DeleteAccountHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// The session is cleared only after the server confirmed the deletion.
    pub async fn handle(&self) -> Result<(), AccountError> {
        let current = self.session.profile().ok_or(AccountError::NotAuthenticated)?;

        self.gateway.delete_user(current.name()).await?;
        self.session.clear().await?;

        tracing::info!(user = %current.name(), "Account deleted");
        Ok(())
    }
}
