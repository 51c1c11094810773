//! Session Storage Port - Interface for persisting the session between runs.
//!
//! A flat key → string store, cleared wholesale on logout. The session store
//! writes two keys: [`TOKEN_KEY`] (the raw bearer token) and [`USER_KEY`]
//! (the profile as a JSON object).

use async_trait::async_trait;

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the serialized profile.
pub const USER_KEY: &str = "user";

/// Errors that can occur during storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the persisted session key/value store
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write several keys in one step.
    ///
    /// Either every entry is stored or none is.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Write a single key.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.set_many(&[(key, value)]).await
    }

    /// Remove every key. Succeeds when already empty.
    async fn clear(&self) -> Result<(), StorageError>;
}
