//! Session value: who is logged in.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::domain::foundation::{MovieId, ValidationError};

use super::Profile;

/// Opaque bearer credential. Redacted in `Debug` output.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    /// Wraps a raw token, returning error if empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::empty_field("token"));
        }
        Ok(Self(SecretString::new(token)))
    }

    /// Exposes the raw token (for request headers and persistence).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for BearerToken {}

/// Token and profile pairing.
///
/// Either both are present or both are absent; the constructors are the only
/// way to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    auth: Option<(BearerToken, Profile)>,
}

impl Session {
    /// The logged-out session.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(token: BearerToken, profile: Profile) -> Self {
        Self {
            auth: Some((token, profile)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.auth.as_ref().map(|(token, _)| token)
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.auth.as_ref().map(|(_, profile)| profile)
    }

    pub(crate) fn profile_mut(&mut self) -> Option<&mut Profile> {
        self.auth.as_mut().map(|(_, profile)| profile)
    }

    /// False when logged out.
    pub fn is_favorite(&self, movie_id: &MovieId) -> bool {
        self.profile()
            .map(|profile| profile.is_favorite(movie_id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserName;

    #[test]
    fn empty_session_has_neither_token_nor_profile() {
        let session = Session::empty();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.profile().is_none());
    }

    #[test]
    fn authenticated_session_exposes_both() {
        let token = BearerToken::new("abc").unwrap();
        let profile = Profile::new(UserName::new("ana").unwrap(), "ana@example.com");
        let session = Session::authenticated(token, profile);

        assert!(session.is_authenticated());
        assert_eq!(session.token().map(|t| t.expose()), Some("abc"));
        assert_eq!(session.profile().map(|p| p.name().as_str()), Some("ana"));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = BearerToken::new("super-secret").unwrap();
        assert!(!format!("{:?}", token).contains("super-secret"));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(BearerToken::new("").is_err());
    }

    #[test]
    fn logged_out_session_has_no_favorites() {
        let movie_id = MovieId::new("m1").unwrap();
        assert!(!Session::empty().is_favorite(&movie_id));
    }
}
