use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{ConfigError, UserConfig};

/// Key-value settings the store reads and writes (music folders, mostly).
pub trait ConfigStore {
    fn get(&self) -> &UserConfig;
    fn set(&mut self, config: UserConfig);
    fn save(&mut self) -> Result<(), ConfigError>;
}

/// `config.toml` on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    config: UserConfig,
    /// The file on disk could not be read as a config; back it up before
    /// the first save overwrites it.
    backup_on_save: bool,
}

impl FileConfigStore {
    /// Load `path`. A missing file is created with defaults. An unreadable
    /// or invalid one falls back to defaults and is copied to
    /// `<path>.bak` before the first save replaces it.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            let mut store = Self {
                path,
                config: UserConfig::default(),
                backup_on_save: false,
            };
            store.save()?;
            return Ok(store);
        }

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        let (config, backup_on_save) = match parsed {
            Ok(config) => (config, false),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                (UserConfig::default(), true)
            }
        };

        Ok(Self {
            path,
            config,
            backup_on_save,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an invalid config is kept once it gets overwritten.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self) -> &UserConfig {
        &self.config
    }

    fn set(&mut self, config: UserConfig) {
        self.config = config;
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        if self.backup_on_save {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|source| ConfigError::Io {
                path: backup.clone(),
                source,
            })?;
            warn!(
                path = %self.path.display(),
                backup = %backup.display(),
                "replacing invalid config, previous file backed up"
            );
            self.backup_on_save = false;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(&self.config)?;
        fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

/// Config held in memory only; `save` is a no-op.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    config: UserConfig,
}

impl MemoryConfigStore {
    pub fn new(config: UserConfig) -> Self {
        Self { config }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self) -> &UserConfig {
        &self.config
    }

    fn set(&mut self, config: UserConfig) {
        self.config = config;
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }
}
