//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{GameService, SessionService, TreeStore};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub game: Arc<GameService>,
    pub store: Arc<TreeStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let game = Arc::new(GameService::new(settings.classifier()));
        let store = Arc::new(TreeStore::new(Arc::clone(&fs)));
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            game,
            store,
        }
    }

    pub fn session(&self) -> SessionService {
        SessionService::new(Arc::clone(&self.game), Arc::clone(&self.store))
    }
}
