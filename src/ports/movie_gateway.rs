//! Movie Gateway Port - Interface to the remote FlickPick API.
//!
//! Abstracts every remote call the client makes (accounts, catalog, favorites)
//! so application handlers never see HTTP details.
//!
//! # Design
//!
//! - Every call except `register` and `login` is authenticated with the
//!   current bearer token
//! - Transport faults are normalized into [`GatewayError`]; callers never see
//!   a raw transport error
//! - Director and genre names are assumed unique remotely; when the API
//!   answers with several matches the first one wins

use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::domain::catalog::{Director, Genre, Movie};
use crate::domain::foundation::{MovieId, UserName};
use crate::domain::user::{BearerToken, FavoriteSet, Profile, ProfilePatch};

/// Port for the remote movie/user service.
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// Create an account (`POST /users`). Unauthenticated.
    async fn register(&self, registration: &Registration) -> Result<Profile, GatewayError>;

    /// Exchange credentials for a token and profile (`POST /login`). Unauthenticated.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError>;

    /// Tell the server the session ended (`POST /logout`).
    async fn logout(&self) -> Result<(), GatewayError>;

    /// Full catalog (`GET /movies`).
    async fn list_movies(&self) -> Result<Vec<Movie>, GatewayError>;

    /// Single movie by title (`GET /movies/{title}`).
    async fn get_movie(&self, title: &str) -> Result<Movie, GatewayError>;

    /// Director record by name (`GET /directors/{name}`).
    async fn get_director(&self, name: &str) -> Result<Director, GatewayError>;

    /// Genre record by name (`GET /genres/{name}`).
    async fn get_genre(&self, name: &str) -> Result<Genre, GatewayError>;

    /// Fresh copy of a user profile (`GET /users/{name}`).
    async fn get_user(&self, name: &UserName) -> Result<Profile, GatewayError>;

    /// Edit profile fields (`PUT /users/{name}`); returns the updated profile.
    async fn update_user(
        &self,
        name: &UserName,
        patch: &ProfilePatch,
    ) -> Result<Profile, GatewayError>;

    /// Delete the account (`DELETE /users/{name}`).
    async fn delete_user(&self, name: &UserName) -> Result<(), GatewayError>;

    /// The server's copy of the user's favorites (`GET /users/{name}/movies`).
    async fn get_favorite_movies(&self, name: &UserName) -> Result<FavoriteSet, GatewayError>;

    /// `POST /users/{name}/movies/{movie_id}`.
    async fn add_favorite(&self, name: &UserName, movie_id: &MovieId)
        -> Result<(), GatewayError>;

    /// `DELETE /users/{name}/movies/{movie_id}`.
    async fn remove_favorite(
        &self,
        name: &UserName,
        movie_id: &MovieId,
    ) -> Result<(), GatewayError>;
}

/// Port through which the gateway reads the current bearer token.
///
/// Implemented by the session store; keeps the gateway free of session state.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<BearerToken>;
}

/// Login form input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: UserName,
    password: SecretString,
}

impl Credentials {
    pub fn new(name: UserName, password: impl Into<String>) -> Self {
        Self {
            name,
            password: SecretString::new(password.into()),
        }
    }

    /// Exposes the password (for building the request body).
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Registration form input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: UserName,
    password: SecretString,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

impl Registration {
    pub fn new(name: UserName, password: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name,
            password: SecretString::new(password.into()),
            email: email.into(),
            birthday: None,
        }
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Exposes the password (for building the request body).
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Successful login: token plus the user's profile.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: BearerToken,
    pub user: Profile,
}

/// Classified gateway failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The server could not be reached (DNS, connect, timeout, broken stream).
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// Missing, expired or rejected token, or bad credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other 4xx: the server refused the request as sent.
    #[error("request rejected ({status}): {message}")]
    ValidationRejected { status: u16, message: String },

    /// 5xx, or a success response whose body could not be read.
    #[error("server fault ({status}): {message}")]
    ServerFault { status: u16, message: String },
}

impl GatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        GatewayError::NetworkUnreachable(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        GatewayError::NotFound(resource.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        GatewayError::ValidationRejected {
            status,
            message: message.into(),
        }
    }

    pub fn server_fault(status: u16, message: impl Into<String>) -> Self {
        GatewayError::ServerFault {
            status,
            message: message.into(),
        }
    }

    /// Maps a non-success HTTP status and its body to the taxonomy.
    ///
    /// `resource` names what was addressed, for `NotFound`.
    pub fn from_status(status: u16, body: impl Into<String>, resource: &str) -> Self {
        let body = body.into();
        match status {
            401 | 403 => GatewayError::Unauthorized,
            404 => GatewayError::not_found(resource),
            400..=499 => GatewayError::rejected(status, body),
            _ => GatewayError::server_fault(status, body),
        }
    }

    /// Whether re-issuing the same request could succeed without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::NetworkUnreachable(_) | GatewayError::ServerFault { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn MovieGateway) {}
    }

    #[test]
    fn token_source_is_object_safe() {
        fn _accepts_dyn(_source: &dyn TokenSource) {}
    }

    #[test]
    fn classifies_auth_statuses_as_unauthorized() {
        assert_eq!(GatewayError::from_status(401, "", "movies"), GatewayError::Unauthorized);
        assert_eq!(GatewayError::from_status(403, "", "movies"), GatewayError::Unauthorized);
    }

    #[test]
    fn classifies_404_with_resource_name() {
        assert_eq!(
            GatewayError::from_status(404, "nope", "directors/Nobody"),
            GatewayError::NotFound("directors/Nobody".to_string())
        );
    }

    #[test]
    fn classifies_other_client_errors_as_rejected() {
        let err = GatewayError::from_status(422, "Name already exists", "users");
        assert_eq!(err, GatewayError::rejected(422, "Name already exists"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn classifies_5xx_as_server_fault() {
        let err = GatewayError::from_status(503, "maintenance", "movies");
        assert!(matches!(err, GatewayError::ServerFault { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(GatewayError::network("connection refused").is_retryable());
        assert!(!GatewayError::Unauthorized.is_retryable());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new(UserName::new("ana").unwrap(), "hunter2");
        assert!(!format!("{:?}", creds).contains("hunter2"));
        assert_eq!(creds.password(), "hunter2");
    }
}
