// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs, keyed by logical name.
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Keys are plain identifiers: ASCII alphanumerics, `_` and `-`.
    #[error("invalid config key `{0}`")]
    InvalidKey(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Service over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Load and deserialize the value stored under `key`.
    ///
    /// A missing key or an empty blob yields `Ok(None)`.
    ///
    /// # Errors
    /// Invalid keys, store failures other than `NotFound`, and malformed JSON.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        check_key(key)?;
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => {
                tracing::debug!(key, "no stored config");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist `value` under `key`.
    ///
    /// # Errors
    /// Invalid keys, serialization and store failures.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        check_key(key)?;
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Default)]
    struct MapStore(RefCell<BTreeMap<String, Vec<u8>>>);

    impl ConfigStore for MapStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0.borrow().get(key).cloned().ok_or(ConfigError::NotFound)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.0.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn missing_and_empty_keys_load_as_none() {
        let store = MapStore::default();
        store.save_raw("blank", b"").unwrap();
        let service = ConfigService::new(store);
        assert!(service.load::<u32>("absent").unwrap().is_none());
        assert!(service.load::<u32>("blank").unwrap().is_none());
    }

    #[test]
    fn saved_values_load_back() {
        let service = ConfigService::new(MapStore::default());
        service.save("workers", &4_u32).unwrap();
        assert_eq!(service.load::<u32>("workers").unwrap(), Some(4));
    }

    #[test]
    fn keys_that_could_escape_a_directory_are_refused() {
        let service = ConfigService::new(MapStore::default());
        for key in ["", "../transcode", "a/b", "a.json"] {
            assert!(
                matches!(service.save(key, &1_u8), Err(ConfigError::InvalidKey(_))),
                "{key:?}"
            );
            assert!(matches!(service.load::<u8>(key), Err(ConfigError::InvalidKey(_))));
        }
        assert!(service.save("transcode-v1_b", &1_u8).is_ok());
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let store = MapStore::default();
        store.save_raw("bad", b"{not json").unwrap();
        let service = ConfigService::new(store);
        assert!(matches!(service.load::<u32>("bad"), Err(ConfigError::Serde(_))));
    }
}
