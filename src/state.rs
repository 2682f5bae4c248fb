use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::generation::GenerationFlow;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    /// Persistent storage; only the session token lives here.
    pub tokens: Arc<dyn KeyValueStore>,
    /// Transient storage for generation results, one entry per tab.
    pub results: Arc<dyn KeyValueStore>,
    pub generation: GenerationFlow,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let tokens: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.token_file));
        Self::with_stores(config, tokens, Arc::new(MemoryStore::new()))
    }

    pub fn with_stores(
        config: Config,
        tokens: Arc<dyn KeyValueStore>,
        results: Arc<dyn KeyValueStore>,
    ) -> Arc<Self> {
        let api = ApiClient::new(&config, tokens.clone());
        Arc::new(Self {
            config,
            api,
            tokens,
            results,
            generation: GenerationFlow::new(),
        })
    }
}
