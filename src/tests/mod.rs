mod server_tests;
mod store_tests;

use std::sync::Arc;

use crate::config::Config;
use crate::state::AppState;
use crate::store::{KeyValueStore, MemoryStore, TOKEN_KEY};

/// App state wired to in-memory stores and the given service URL.
pub(crate) fn test_state(api_url: &str, token: Option<&str>) -> Arc<AppState> {
    let config = Config::with_api_url(api_url).unwrap();
    let tokens = match token {
        Some(t) => MemoryStore::with_entry(TOKEN_KEY, t),
        None => MemoryStore::new(),
    };
    let tokens: Arc<dyn KeyValueStore> = Arc::new(tokens);
    AppState::with_stores(config, tokens, Arc::new(MemoryStore::new()))
}

/// Base URL of a port nothing listens on.
pub(crate) fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
