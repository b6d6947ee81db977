//! Shared application state handed to every handler.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::IdentityEnvelope;
use crate::config::AppConfig;
use crate::database::{
    DatabaseManager, EmbeddingRepository, ItemRepository, ItemStore, UserRepository, UserStore,
};
use crate::services::{http_client, CnnFeatureClient, FeatureExtractor, ImageHost, ImgBbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub envelope: Arc<IdentityEnvelope>,
    pub pool: PgPool,
    pub users: Arc<dyn UserStore>,
    pub items: Arc<dyn ItemStore>,
    pub embeddings: EmbeddingRepository,
    pub image_host: Arc<dyn ImageHost>,
    pub extractor: Arc<dyn FeatureExtractor>,
}

impl AppState {
    /// Wire production clients from configuration. Does not touch the network.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let pool = DatabaseManager::connect_lazy(&config.database)?;
        let http = http_client()?;

        let image_host = Arc::new(ImgBbClient::new(
            http.clone(),
            config.services.imgbb_api_key.clone(),
            config.services.imgbb_upload_url.clone(),
        ));
        let extractor = Arc::new(CnnFeatureClient::new(
            http,
            &config.services.embedding_base_url,
            Duration::from_secs(config.services.embedding_timeout_secs),
        ));

        Self::with_services(config, pool, image_host, extractor)
    }

    /// Assemble state around caller supplied outbound clients.
    pub fn with_services(
        config: AppConfig,
        pool: PgPool,
        image_host: Arc<dyn ImageHost>,
        extractor: Arc<dyn FeatureExtractor>,
    ) -> anyhow::Result<Self> {
        let envelope = IdentityEnvelope::from_config(&config.security)?;

        Ok(Self {
            config: Arc::new(config),
            envelope: Arc::new(envelope),
            users: Arc::new(UserRepository::new(pool.clone())),
            items: Arc::new(ItemRepository::new(pool.clone())),
            embeddings: EmbeddingRepository::new(pool.clone()),
            pool,
            image_host,
            extractor,
        })
    }

    /// Replace the user and listing stores.
    pub fn with_stores(mut self, users: Arc<dyn UserStore>, items: Arc<dyn ItemStore>) -> Self {
        self.users = users;
        self.items = items;
        self
    }
}
