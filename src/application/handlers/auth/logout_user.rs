//! LogoutHandler - Ends the session.

use std::sync::Arc;

use crate::application::handlers::AccountError;
use crate::application::SessionStore;
use crate::ports::{GatewayError, MovieGateway};

/// Result of a logout. The local session is always cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogoutResult {
    /// Set when the server could not be told about the logout.
    pub remote_error: Option<GatewayError>,
}

/// Handler for logging out.
pub struct LogoutHandler {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
}

impl LogoutHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Notifies the server (best effort), then clears the session.
    ///
    /// Fails only when the cleared session cannot be persisted.
    pub async fn handle(&self) -> Result<LogoutResult, AccountError> {
        let remote_error = if self.session.is_authenticated() {
            match self.gateway.logout().await {
                Ok(()) => None,
                Err(error) => {
                    tracing::warn!(error = %error, "Remote logout failed; clearing locally");
                    Some(error)
                }
            }
        } else {
            None
        };

        self.session.clear().await?;
        Ok(LogoutResult { remote_error })
    }
}
