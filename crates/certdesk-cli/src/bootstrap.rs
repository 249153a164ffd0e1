//! Composition root: builds the store, state, services and guard from config.

use std::sync::Arc;

use anyhow::{Context, Result};
use certdesk_application::{AuthService, DataSyncService, SessionController};
use certdesk_core::api::ApiClient;
use certdesk_core::config::ClientConfig;
use certdesk_core::routing::{Navigator, RouteGuard};
use certdesk_core::session::{KeyValueStore, SessionState, SessionStorage};
use certdesk_infrastructure::{ConfigService, FileStore, HttpApiClient};

/// Prints navigation requests, since a terminal has no pages to move between.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        println!("-> {}", path);
    }
}

pub struct App {
    pub config: ClientConfig,
    pub controller: Arc<SessionController>,
    pub auth: AuthService,
    pub sync: DataSyncService,
    pub guard: RouteGuard,
    pub navigator: ConsoleNavigator,
}

impl App {
    /// Wires everything up and restores any stored session.
    pub fn bootstrap(config_service: &ConfigService, config: ClientConfig) -> Result<Self> {
        let session_file = config_service
            .session_file(&config)
            .context("Failed to resolve session file")?;
        tracing::debug!(
            "[App] api={}, session_file={}",
            config.api.base_url,
            session_file.display()
        );

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(session_file));
        let storage = SessionStorage::new(store, config.storage.namespace.clone());
        let controller = Arc::new(SessionController::new(
            Arc::new(SessionState::new()),
            storage,
        ));
        let api: Arc<dyn ApiClient> =
            Arc::new(HttpApiClient::new(&config.api).context("Failed to create API client")?);

        controller.init_session();

        Ok(Self {
            auth: AuthService::new(api.clone(), controller.clone()),
            sync: DataSyncService::new(api, controller.clone()),
            controller,
            guard: RouteGuard::standard(),
            navigator: ConsoleNavigator,
            config,
        })
    }
}
