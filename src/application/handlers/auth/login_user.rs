//! LoginHandler - Exchanges credentials for a session.

use std::sync::Arc;

use crate::application::handlers::AccountError;
use crate::application::SessionStore;
use crate::domain::user::Profile;
use crate::ports::{Credentials, MovieGateway};

/// Command to log in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub credentials: Credentials,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub profile: Profile,
}

/// Handler for logging in.
pub struct LoginHandler {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
}

impl LoginHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// On failure the session is left exactly as it was.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let response = self.gateway.login(&cmd.credentials).await.map_err(|error| {
            tracing::warn!(user = %cmd.credentials.name, error = %error, "Login failed");
            error
        })?;

        self.session
            .establish(response.token, response.user.clone())
            .await?;

        Ok(LoginResult {
            profile: response.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::MockMovieGateway;
    use crate::adapters::storage::InMemorySessionStorage;
    use crate::domain::foundation::UserName;
    use crate::ports::{GatewayError, SessionStorage, TokenSource, TOKEN_KEY};

    fn ana() -> Profile {
        Profile::new(UserName::new("ana").unwrap(), "ana@example.com")
    }

    fn login(password: &str) -> LoginCommand {
        LoginCommand {
            credentials: Credentials::new(UserName::new("ana").unwrap(), password),
        }
    }

    #[tokio::test]
    async fn successful_login_establishes_session() {
        let storage = InMemorySessionStorage::new();
        let session = Arc::new(SessionStore::new(Arc::new(storage.clone())));
        let gateway = MockMovieGateway::new().with_user(ana(), "secret");
        let handler = LoginHandler::new(Arc::new(gateway), session.clone());

        let result = handler.handle(login("secret")).await.unwrap();

        assert_eq!(result.profile.name().as_str(), "ana");
        assert!(session.is_authenticated());
        assert_eq!(
            session.bearer_token().map(|t| t.expose().to_string()),
            Some("token-ana".to_string())
        );
        assert!(storage.get(TOKEN_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn wrong_password_leaves_session_empty() {
        let storage = InMemorySessionStorage::new();
        let session = Arc::new(SessionStore::new(Arc::new(storage.clone())));
        let gateway = MockMovieGateway::new().with_user(ana(), "secret");
        let handler = LoginHandler::new(Arc::new(gateway), session.clone());

        let err = handler.handle(login("wrong")).await.unwrap_err();

        assert_eq!(err, AccountError::Remote(GatewayError::Unauthorized));
        assert!(!session.is_authenticated());
        assert!(storage.is_empty().await);
    }
}
