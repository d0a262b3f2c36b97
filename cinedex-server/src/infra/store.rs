use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use cinedex_core::query::PatternNormalizer;
use cinedex_core::{CatalogService, DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};
use tracing::info;

use crate::infra::config::{Config, StoreBackend, StoreConfig};

/// Opens the store selected by configuration.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Postgres => {
            let store = connect_postgres(config).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => InMemoryDocumentStore::from_json_file(path)
                    .with_context(|| format!("failed to seed memory store from {}", path.display()))?,
                None => InMemoryDocumentStore::new(),
            };
            info!(documents = store.len(), "memory store ready");
            Ok(Arc::new(store))
        }
    }
}

pub async fn connect_postgres(config: &StoreConfig) -> Result<PostgresDocumentStore> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("no database URL configured"))?;
    PostgresDocumentStore::connect(url, config.max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

/// Wraps the store in the catalog façade with the configured match mode.
pub fn build_catalog(store: Arc<dyn DocumentStore>, config: &Config) -> CatalogService {
    CatalogService::with_patterns(store, PatternNormalizer::new(config.search.match_mode()))
}
