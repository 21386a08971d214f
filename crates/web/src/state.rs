//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::{SessionManager, StaticCredentials};
use crate::config::AppConfig;
use crate::favorites::FavoritesManager;
use crate::recipes::RecipeService;
use crate::spoonacular::RecipeApiClient;
use crate::store::{SnapshotStore, StoreError};

/// Application state shared across all handlers.
///
/// Constructed once at startup and injected everywhere via axum's `State`;
/// there are no hidden singletons. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    sessions: SessionManager,
    favorites: FavoritesManager,
    recipes: RecipeService,
}

impl AppState {
    /// Create the application state, restoring persisted session and
    /// favorites snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: AppConfig) -> Result<Self, StoreError> {
        let store = SnapshotStore::open(&config.data_dir)?;

        let sessions = SessionManager::new(store.clone(), Box::new(StaticCredentials::demo()));
        let favorites = FavoritesManager::new(store);
        let recipes = RecipeService::new(RecipeApiClient::new(&config.spoonacular));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                sessions,
                favorites,
                recipes,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the session manager.
    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }

    /// Get a reference to the favorites manager.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesManager {
        &self.inner.favorites
    }

    /// Get a reference to the recipe service.
    #[must_use]
    pub fn recipes(&self) -> &RecipeService {
        &self.inner.recipes
    }
}
