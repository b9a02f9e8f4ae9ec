use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persisted settings, stored in `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Folders the library scanner walks. Kept canonical, deduplicated and sorted.
    #[serde(default)]
    pub music_folders: Vec<PathBuf>,
    /// JSON track list loaded at startup when `--library` is not given.
    #[serde(default)]
    pub library_file: Option<PathBuf>,
}
