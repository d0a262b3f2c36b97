use super::models::{Config, StoreBackend};

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Non-fatal sanity checks on a composed configuration.
pub fn collect_warnings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    match config.store.backend {
        StoreBackend::Memory => {
            if config.store.seed_path.is_none() {
                warnings.push_with_hint(
                    "Memory store has no seed file; the catalog starts empty",
                    "Set CINEDEX_SEED_PATH or [store] seed_path to a JSON array of movies",
                );
            }
            if config.store.url.is_some() {
                warnings.push("Database URL is ignored by the memory store");
            }
        }
        StoreBackend::Postgres => {
            if config.store.seed_path.is_some() {
                warnings.push("seed_path only applies to the memory store; ignoring it");
            }
        }
    }

    if config.cors.is_wildcard_included() && config.cors.allowed_origins.len() > 1 {
        warnings.push("CORS wildcard origin makes the other listed origins redundant");
    }

    if config.search.raw_patterns {
        warnings.push_with_hint(
            "Raw search patterns enabled; user terms are used as regular expressions",
            "Disable [search] raw_patterns to match keywords literally",
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::models::{
        ConfigMetadata, CorsConfig, SearchConfig, ServerConfig, StoreConfig,
    };

    fn config(backend: StoreBackend) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8000,
            },
            store: StoreConfig {
                backend,
                url: None,
                max_connections: 10,
                seed_path: None,
            },
            search: SearchConfig::default(),
            cors: CorsConfig::default(),
            metadata: ConfigMetadata::default(),
        }
    }

    #[test]
    fn unseeded_memory_store_warns() {
        let warnings = collect_warnings(&config(StoreBackend::Memory));
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].hint.is_some());
    }

    #[test]
    fn clean_postgres_config_is_quiet() {
        let mut config = config(StoreBackend::Postgres);
        config.store.url = Some("postgres://localhost/cinedex".into());
        assert!(collect_warnings(&config).is_empty());
    }
}
