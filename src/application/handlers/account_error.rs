//! Errors shared by the account flows (login, registration, profile edits).

use thiserror::Error;

use crate::application::SessionError;
use crate::ports::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("no user is logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Remote(#[from] GatewayError),

    #[error(transparent)]
    Session(SessionError),
}

impl From<SessionError> for AccountError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::NotAuthenticated => AccountError::NotAuthenticated,
            other => AccountError::Session(other),
        }
    }
}

impl AccountError {
    /// True when the server refused the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AccountError::Remote(GatewayError::Unauthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StorageError;

    #[test]
    fn session_not_authenticated_maps_to_account_variant() {
        let err: AccountError = SessionError::NotAuthenticated.into();
        assert_eq!(err, AccountError::NotAuthenticated);
    }

    #[test]
    fn storage_failures_stay_session_errors() {
        let err: AccountError = SessionError::Storage(StorageError::IoError("disk".into())).into();
        assert!(matches!(err, AccountError::Session(SessionError::Storage(_))));
    }

    #[test]
    fn unauthorized_is_detected() {
        assert!(AccountError::from(GatewayError::Unauthorized).is_unauthorized());
        assert!(!AccountError::NotAuthenticated.is_unauthorized());
    }
}
