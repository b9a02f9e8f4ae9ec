use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to persist configuration")]
    Config(#[from] ConfigError),
}
