//! UpdateProfileHandler - Edits the logged-in user's profile fields.

use std::sync::Arc;

use crate::application::handlers::AccountError;
use crate::application::SessionStore;
use crate::domain::user::{Profile, ProfilePatch};
use crate::ports::MovieGateway;

/// Command to edit profile fields. Favorites are not editable here.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub patch: ProfilePatch,
}

/// Handler for profile edits.
pub struct UpdateProfileHandler {
    gateway: Arc<dyn MovieGateway>,
    session: Arc<SessionStore>,
}

impl UpdateProfileHandler {
    pub fn new(gateway: Arc<dyn MovieGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Sends the patch and merges what the server returns.
    ///
    /// An empty patch returns the current profile without a remote call.
    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<Profile, AccountError> {
        let current = self.session.profile().ok_or(AccountError::NotAuthenticated)?;
        if cmd.patch.is_empty() {
            return Ok(current);
        }

        let updated = self.gateway.update_user(current.name(), &cmd.patch).await?;
        let merged = self
            .session
            .update_profile(&ProfilePatch::from_profile(&updated))
            .await?;

        tracing::info!(user = %merged.name(), "Profile updated");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::{GatewayOperation, MockMovieGateway};
    use crate::adapters::storage::InMemorySessionStorage;
    use crate::domain::foundation::{MovieId, UserName};
    use crate::domain::user::BearerToken;
    use crate::ports::GatewayError;

    fn ana() -> Profile {
        Profile::new(UserName::new("ana").unwrap(), "ana@example.com")
            .with_favorites([MovieId::new("m1").unwrap()].into_iter().collect())
    }

    async fn setup(gateway: &MockMovieGateway) -> (UpdateProfileHandler, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::new(Arc::new(InMemorySessionStorage::new())));
        session
            .establish(BearerToken::new("tok").unwrap(), ana())
            .await
            .unwrap();
        let handler = UpdateProfileHandler::new(Arc::new(gateway.clone()), session.clone());
        (handler, session)
    }

    #[tokio::test]
    async fn merges_server_profile_and_keeps_favorites() {
        let gateway = MockMovieGateway::new().with_user(ana(), "pw");
        let (handler, session) = setup(&gateway).await;

        let profile = handler
            .handle(UpdateProfileCommand {
                patch: ProfilePatch::new().with_email("new@example.com"),
            })
            .await
            .unwrap();

        assert_eq!(profile.email(), "new@example.com");
        assert!(session.is_favorite(&MovieId::new("m1").unwrap()));
    }

    #[tokio::test]
    async fn response_without_email_keeps_local_email() {
        let server_copy = Profile::new(UserName::new("ana").unwrap(), "");
        let gateway = MockMovieGateway::new().with_user(server_copy, "pw");
        let (handler, session) = setup(&gateway).await;
        let birthday = chrono::NaiveDate::from_ymd_opt(1990, 4, 12).unwrap();

        let profile = handler
            .handle(UpdateProfileCommand {
                patch: ProfilePatch::new().with_birthday(birthday),
            })
            .await
            .unwrap();

        assert_eq!(profile.email(), "ana@example.com");
        assert_eq!(profile.birthday(), Some(birthday));
        assert_eq!(session.profile().unwrap().email(), "ana@example.com");
    }

    #[tokio::test]
    async fn rejected_update_leaves_profile() {
        let gateway = MockMovieGateway::new().with_user(ana(), "pw");
        gateway.fail_next(
            GatewayOperation::UpdateUser,
            GatewayError::rejected(422, "Email is invalid"),
        );
        let (handler, session) = setup(&gateway).await;

        let result = handler
            .handle(UpdateProfileCommand {
                patch: ProfilePatch::new().with_email("nope"),
            })
            .await;

        assert!(matches!(result, Err(AccountError::Remote(_))));
        assert_eq!(session.profile().unwrap().email(), "ana@example.com");
    }

    #[tokio::test]
    async fn empty_patch_makes_no_call() {
        let gateway = MockMovieGateway::new().with_user(ana(), "pw");
        let (handler, _) = setup(&gateway).await;

        handler
            .handle(UpdateProfileCommand {
                patch: ProfilePatch::new(),
            })
            .await
            .unwrap();

        assert_eq!(gateway.call_count(), 0);
    }
}
