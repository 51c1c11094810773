//! FlickPick command-line client.
//!
//! Restores the persisted session and, when logged in, loads the catalog and
//! logs a summary of it.

use std::process::ExitCode;
use std::sync::Arc;

use flickpick::adapters::{FileSessionStorage, RestMovieGateway};
use flickpick::application::{CatalogViewModel, RefreshProfileHandler, SessionStore};
use flickpick::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to load configuration: {}", error);
            return ExitCode::FAILURE;
        }
    };
    config.logging.init();

    if let Err(error) = config.validate() {
        tracing::error!(error = %error, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let storage = Arc::new(FileSessionStorage::new(&config.storage.session_path));
    let session = Arc::new(SessionStore::new(storage));
    let gateway = match RestMovieGateway::new(config.api.gateway_config(), session.clone()) {
        Ok(gateway) => Arc::new(gateway),
        Err(error) => {
            tracing::error!(error = %error, "Failed to build API client");
            return ExitCode::FAILURE;
        }
    };

    let restored = session.initialize().await;
    let Some(profile) = restored.profile() else {
        tracing::info!(
            path = %config.storage.session_path.display(),
            "Not logged in; nothing to show"
        );
        return ExitCode::SUCCESS;
    };
    tracing::debug!(user = %profile.name(), favorites = profile.favorite_movie_ids().len(), "Loading catalog");

    let catalog = CatalogViewModel::new(gateway.clone(), session.clone());
    let refresh = RefreshProfileHandler::new(gateway, session.clone());

    let (loaded, refreshed) = futures::join!(catalog.load(), refresh.handle());

    if let Err(error) = refreshed {
        tracing::warn!(error = %error, "Could not refresh profile; using stored copy");
    }

    match loaded {
        Ok(count) => {
            let favorites = catalog.favorites_only();
            tracing::info!(movies = count, favorites = favorites.count(), "Catalog loaded");
            for movie in &favorites {
                tracing::info!(id = %movie.id, title = %movie.title, "Favorite");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(error = %error, "Failed to load catalog");
            ExitCode::FAILURE
        }
    }
}
