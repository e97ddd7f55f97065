// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config store held in memory, for CLI config-loading tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use mapstudio_config::{ConfigError, ConfigStore};

/// In-memory [`ConfigStore`]. Clones share the same blobs.
///
/// ```
/// use mapstudio_config::{ConfigService, TRANSCODE_KEY};
/// use mapstudio_dry_tests::MemoryStore;
///
/// let store = MemoryStore::holding(TRANSCODE_KEY, r#"{"workers":2}"#);
/// let service = ConfigService::new(store.clone());
/// let config: Option<serde_json::Value> = service.load(TRANSCODE_KEY).unwrap();
/// assert_eq!(config.unwrap()["workers"], 2);
/// assert_eq!(store.loads(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    blobs: BTreeMap<String, Vec<u8>>,
    loads: usize,
    unavailable: bool,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `json` saved under `key`.
    pub fn holding(key: &str, json: &str) -> Self {
        let store = Self::new();
        store.lock().blobs.insert(key.to_owned(), json.as_bytes().to_vec());
        store
    }

    /// Store whose every load fails with [`ConfigError::Other`].
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.lock().unavailable = true;
        store
    }

    /// Loads attempted so far, failed ones included.
    pub fn loads(&self) -> usize {
        self.lock().loads
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConfigStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut state = self.lock();
        state.loads += 1;
        if state.unavailable {
            return Err(ConfigError::Other("config store unavailable".into()));
        }
        state.blobs.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.lock().blobs.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clones_see_each_others_saves() {
        let store = MemoryStore::new();
        store.clone().save_raw("transcode", b"{}").unwrap();
        assert_eq!(store.load_raw("transcode").unwrap(), b"{}");
        assert!(matches!(store.load_raw("other"), Err(ConfigError::NotFound)));
        assert_eq!(store.loads(), 2);
    }

    #[test]
    fn unavailable_store_counts_failed_loads() {
        let store = MemoryStore::unavailable();
        assert!(matches!(store.load_raw("transcode"), Err(ConfigError::Other(_))));
        assert_eq!(store.loads(), 1);
    }
}
