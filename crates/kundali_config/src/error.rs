//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}
