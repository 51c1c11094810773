//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the persisted session lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptySessionPath);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        let config = StorageConfig::default();
        assert_eq!(config.session_path, PathBuf::from("./data/session.yaml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = StorageConfig {
            session_path: PathBuf::new(),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptySessionPath));
    }
}
