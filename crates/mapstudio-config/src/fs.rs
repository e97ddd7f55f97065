// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` (uses the platform config dir).

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::store::{ConfigError, ConfigStore};

/// Stores configs as JSON files, one `<key>.json` per key.
#[derive(Clone, Debug)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Store rooted at the user config directory (e.g. `~/.config/mapstudio`).
    ///
    /// Nothing is created until the first save, so read-only tools leave no
    /// trace.
    ///
    /// # Errors
    /// [`ConfigError::Other`] when no home directory can be resolved.
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "mapstudio")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Ok(Self::at(proj.config_dir()))
    }

    /// Store rooted at `dir`. The directory is created on first save.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            base: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory the store writes into.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Writes `<key>.json.tmp` and renames it over `<key>.json`, so readers
    /// see either the old or the new file.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base)?;
        let path = self.path_for(key);
        let staging = self.base.join(format!("{key}.json.tmp"));
        fs::write(&staging, data)?;
        fs::rename(&staging, &path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "config saved");
        Ok(())
    }
}
