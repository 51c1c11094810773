//! RefreshProfileHandler - Re-reads the profile from the server.
//!
//! The recovery path when local favorites drift from the server's.

use std::sync::Arc;

use crate::application::handlers::AccountError;
use crate::application::SessionStore;
use crate::domain::user::Profile;
use crate::ports::MovieGateway;

pub struct RefreshProfileHandler {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
}

impl RefreshProfileHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    pub async fn handle(&self) -> Result<Profile, AccountError> {
        let current = self.session.profile().ok_or(AccountError::NotAuthenticated)?;

        let fresh = self.gateway.get_user(current.name()).await?;
        self.session.replace_profile(fresh.clone()).await?;

        tracing::debug!(
            user = %fresh.name(),
            favorites = fresh.favorite_movie_ids().len(),
            "Profile refreshed"
        );
        Ok(fresh)
    }
}
