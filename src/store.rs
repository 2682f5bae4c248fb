use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Key under which the external login flow leaves the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Prefix of the per-tab keys holding the last generation response, written
/// by the generation page and read by the result page.
pub const LAST_RESULT_KEY: &str = "last_result";

/// String key-value storage shared by the pages and the API client.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

/// Process-lifetime storage. Backs the transient result slot and stands in
/// for every store under test.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().unwrap().insert(key.to_string(), value);
    }
}

/// Storage persisted as a flat JSON object on disk.
///
/// The file is re-read on every `get` so a token dropped in by an outside
/// login step is picked up without a restart. Read and write failures are
/// logged and treated as a missing entry.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: RwLock::new(()),
        }
    }

    fn load(&self) -> HashMap<String, String> {
        if !self.path.exists() {
            return HashMap::new();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), "failed to parse store file: {e}");
                    HashMap::new()
                }
            },
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read store file: {e}");
                HashMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.write_lock.read().unwrap();
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: String) {
        let _guard = self.write_lock.write().unwrap();
        let mut map = self.load();
        map.insert(key.to_string(), value);
        match serde_json::to_string_pretty(&map) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), "failed to write store file: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize store: {e}"),
        }
    }
}
