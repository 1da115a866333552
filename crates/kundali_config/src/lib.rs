//! # kundali_config
//!
//! Layered configuration loading for the kundali tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KUNDALI_*` prefix, `__` as separator)
//! 2. An explicit file passed by the caller (e.g. `--config`)
//! 3. Project-level `./kundali.toml`
//! 4. User-level `~/.config/kundali/config.toml`
//! 5. Built-in defaults
//!
//! Figment maps `KUNDALI_NORMALIZE__HINT_FALLBACK` -> `normalize.hint_fallback`,
//! `KUNDALI_OUTPUT__FORMAT` -> `output.format`, and so on.
//!
//! ```no_run
//! use kundali_config::KundaliConfig;
//!
//! let config = KundaliConfig::load().expect("config");
//! if !config.normalize.hint_fallback {
//!     println!("quadrant charts will not fall back to upstream house numbers");
//! }
//! ```

mod error;
mod output;

pub use error::ConfigError;
pub use output::{OutputConfig, OutputFormat};

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use kundali_chart::NormalizeOptions;
use serde::{Deserialize, Serialize};

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "kundali.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "KUNDALI_";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KundaliConfig {
    #[serde(default)]
    pub normalize: NormalizeOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

impl KundaliConfig {
    /// Load from defaults, config files, and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_file(None)
    }

    /// Load with one extra TOML file layered above the discovered files.
    ///
    /// Unlike the discovered files, an explicit file must exist.
    pub fn load_with_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(p) = path {
            if !p.exists() {
                return Err(ConfigError::MissingFile(p.to_path_buf()));
            }
        }
        Ok(Self::figment(path).extract()?)
    }

    /// Build the figment provider chain.
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(p) = extra {
            figment = figment.merge(Toml::file(p));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kundali").join("config.toml"))
    }
}
