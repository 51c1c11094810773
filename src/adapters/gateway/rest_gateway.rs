//! REST Gateway - Implementation of MovieGateway over the FlickPick HTTP API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RestGatewayConfig::new("https://flickpick-1911bf3985c5.herokuapp.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let gateway = RestMovieGateway::new(config, session_store.clone())?;
//! ```
//!
//! # Authentication
//!
//! The bearer token is read from the [`TokenSource`] on every call, so a login
//! or logout is picked up without rebuilding the gateway.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::catalog::{Director, Genre, Movie};
use crate::domain::foundation::{MovieId, UserName};
use crate::domain::user::{BearerToken, FavoriteSet, Profile, ProfilePatch};
use crate::ports::{
    Credentials, GatewayError, LoginResponse, MovieGateway, Registration, TokenSource,
};

use super::dto::{
    error_message, FavoritesBody, LoginRequest, LoginResponseBody, OneOrMany, RegisterRequest,
};

/// Public FlickPick deployment.
pub const DEFAULT_BASE_URL: &str = "https://flickpick-1911bf3985c5.herokuapp.com";

/// Configuration for the REST gateway.
#[derive(Debug, Clone)]
pub struct RestGatewayConfig {
    /// API root, e.g. "https://flickpick-1911bf3985c5.herokuapp.com".
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl RestGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RestGatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// FlickPick API client.
pub struct RestMovieGateway {
    base_url: Url,
    client: Client,
    tokens: Arc<dyn TokenSource>,
}

impl RestMovieGateway {
    /// Creates a gateway reading its bearer token from `tokens`.
    pub fn new(config: RestGatewayConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::network(format!("invalid base URL '{}': {}", config.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(GatewayError::network(format!(
                "invalid base URL '{}'",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            client,
            tokens,
        })
    }

    /// Builds an endpoint URL; each segment is percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attaches the bearer token, or fails without touching the network.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, GatewayError> {
        let token = self.tokens.bearer_token().ok_or_else(|| {
            tracing::debug!("No bearer token available for authenticated call");
            GatewayError::Unauthorized
        })?;
        Ok(request.bearer_auth(token.expose()))
    }

    /// Sends the request and maps transport faults and error statuses.
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::network(format!("request to {} timed out", resource))
            } else if e.is_connect() {
                GatewayError::network(format!("connection failed: {}", e))
            } else {
                GatewayError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let mut message = error_message(&body);
        if message.is_empty() {
            message = status.canonical_reason().unwrap_or("unknown error").to_string();
        }

        tracing::debug!(status = status.as_u16(), resource, %message, "FlickPick API error");
        Err(GatewayError::from_status(status.as_u16(), message, resource))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            tracing::warn!(status, error = %e, "Unreadable FlickPick response body");
            GatewayError::server_fault(status, format!("unreadable response body: {}", e))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let resource = segments.join("/");
        tracing::debug!(resource = %resource, "GET");
        let request = self.authorized(self.client.get(self.url(segments)))?;
        let response = self.send(request, &resource).await?;
        Self::read_json(response).await
    }

    /// Name lookup where the first match wins.
    async fn lookup<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let body: OneOrMany<T> = self.get_json(segments).await?;
        body.into_first()
            .ok_or_else(|| GatewayError::not_found(segments.join("/")))
    }
}

#[async_trait]
impl MovieGateway for RestMovieGateway {
    async fn register(&self, registration: &Registration) -> Result<Profile, GatewayError> {
        tracing::debug!(user = %registration.name, "Registering user");
        let request = self
            .client
            .post(self.url(&["users"]))
            .json(&RegisterRequest::from(registration));
        let response = self.send(request, "users").await?;
        Self::read_json(response).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        tracing::debug!(user = %credentials.name, "Logging in");
        let request = self
            .client
            .post(self.url(&["login"]))
            .json(&LoginRequest::from(credentials));
        let response = self.send(request, "login").await?;
        let status = response.status().as_u16();
        let body: LoginResponseBody = Self::read_json(response).await?;

        let token = BearerToken::new(body.token)
            .map_err(|_| GatewayError::server_fault(status, "login response carried an empty token"))?;

        Ok(LoginResponse {
            token,
            user: body.user,
        })
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        let request = self.authorized(self.client.post(self.url(&["logout"])))?;
        self.send(request, "logout").await?;
        Ok(())
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, GatewayError> {
        self.get_json(&["movies"]).await
    }

    async fn get_movie(&self, title: &str) -> Result<Movie, GatewayError> {
        self.lookup(&["movies", title]).await
    }

    async fn get_director(&self, name: &str) -> Result<Director, GatewayError> {
        self.lookup(&["directors", name]).await
    }

    async fn get_genre(&self, name: &str) -> Result<Genre, GatewayError> {
        self.lookup(&["genres", name]).await
    }

    async fn get_user(&self, name: &UserName) -> Result<Profile, GatewayError> {
        self.get_json(&["users", name.as_str()]).await
    }

    async fn update_user(
        &self,
        name: &UserName,
        patch: &ProfilePatch,
    ) -> Result<Profile, GatewayError> {
        let resource = format!("users/{}", name);
        let request = self.authorized(self.client.put(self.url(&["users", name.as_str()])))?;
        let response = self.send(request.json(patch), &resource).await?;
        Self::read_json(response).await
    }

    async fn delete_user(&self, name: &UserName) -> Result<(), GatewayError> {
        let resource = format!("users/{}", name);
        let request = self.authorized(self.client.delete(self.url(&["users", name.as_str()])))?;
        self.send(request, &resource).await?;
        Ok(())
    }

    async fn get_favorite_movies(&self, name: &UserName) -> Result<FavoriteSet, GatewayError> {
        let body: FavoritesBody = self.get_json(&["users", name.as_str(), "movies"]).await?;
        Ok(body.into_set())
    }

    async fn add_favorite(
        &self,
        name: &UserName,
        movie_id: &MovieId,
    ) -> Result<(), GatewayError> {
        let segments = ["users", name.as_str(), "movies", movie_id.as_str()];
        let request = self.authorized(self.client.post(self.url(&segments)))?;
        self.send(request, &segments.join("/")).await?;
        Ok(())
    }

    async fn remove_favorite(
        &self,
        name: &UserName,
        movie_id: &MovieId,
    ) -> Result<(), GatewayError> {
        let segments = ["users", name.as_str(), "movies", movie_id.as_str()];
        let request = self.authorized(self.client.delete(self.url(&segments)))?;
        self.send(request, &segments.join("/")).await?;
        Ok(())
    }
}
