use std::sync::Arc;

use axum_test::TestServer;
use cinedex_core::{CatalogService, DocumentStore, InMemoryDocumentStore};
use cinedex_server::{
    AppState,
    infra::{
        config::{
            Config, ConfigMetadata, CorsConfig, SearchConfig, ServerConfig, StoreBackend,
            StoreConfig,
        },
        store::build_catalog,
    },
    routes::create_app,
};

pub const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../cinedex-core/fixtures/movies.json");

// Shared by several test binaries; not every helper is used by each.
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

#[allow(unused)]
impl TestApp {
    pub fn into_parts(self) -> (TestServer, AppState) {
        (self.server, self.state)
    }

    pub fn catalog(&self) -> &CatalogService {
        self.state.catalog()
    }
}

#[allow(unused)]
pub fn test_config(search: SearchConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            url: None,
            max_connections: 1,
            seed_path: Some(FIXTURE.into()),
        },
        search,
        cors: CorsConfig::default(),
        metadata: ConfigMetadata::default(),
    }
}

#[allow(unused)]
pub fn build_test_app_with(store: Arc<dyn DocumentStore>, search: SearchConfig) -> TestApp {
    let config = test_config(search);
    let catalog = build_catalog(store, &config);
    let state = AppState::new(catalog, config);
    let server = TestServer::new(create_app(state.clone())).unwrap();
    TestApp { server, state }
}

/// App over an in-memory store seeded with the movie fixture.
#[allow(unused)]
pub fn build_test_app() -> TestApp {
    let store = InMemoryDocumentStore::from_json_file(FIXTURE).expect("fixture loads");
    build_test_app_with(Arc::new(store), SearchConfig::default())
}
