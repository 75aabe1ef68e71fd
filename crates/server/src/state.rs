use std::sync::Arc;
use std::time::Duration;

use consumet::ConsumetClient;
use mangadex::MangadexClient;
use parking_lot::RwLock;
use providers::ProviderRegistry;
use reqwest::Client;
use sqlx::SqlitePool;
use tmdb::TmdbClient;

use crate::config::Config;
use crate::services::ProgressSyncService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub registry: Arc<ProviderRegistry>,
    pub progress: Arc<ProgressSyncService>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        // Same failure mode as reqwest::Client::new(): an unusable
        // TLS backend is unrecoverable at startup.
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        let token = Arc::new(RwLock::new(config.tmdb_token.clone()));
        let tmdb = Arc::new(TmdbClient::new(http_client.clone(), token));
        let consumet = Arc::new(match &config.consumet_base_url {
            Some(base) => ConsumetClient::with_base_url(http_client.clone(), base.clone()),
            None => ConsumetClient::new(http_client.clone()),
        });
        let mangadex = Arc::new(MangadexClient::new(http_client));

        let registry = Arc::new(ProviderRegistry::new(tmdb, consumet, mangadex));
        let progress = Arc::new(ProgressSyncService::new(db.clone()));

        Self {
            db,
            config: Arc::new(config),
            registry,
            progress,
        }
    }

    /// State with an injected registry; used by tests to substitute
    /// mock providers.
    pub fn with_registry(db: SqlitePool, config: Config, registry: Arc<ProviderRegistry>) -> Self {
        let progress = Arc::new(ProgressSyncService::new(db.clone()));
        Self {
            db,
            config: Arc::new(config),
            registry,
            progress,
        }
    }
}
