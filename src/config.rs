//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/parcel/parcel.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `PARCEL_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub currency_symbol: Option<String>,
    pub color: Option<bool>,
    pub manifest: Option<PathBuf>,
}

/// Unified configuration for parcel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Symbol printed in front of prices (default: "$")
    pub currency_symbol: String,
    /// Colored terminal output (default: true)
    pub color: bool,
    /// Manifest used when a command gets no `--manifest`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            color: true,
            manifest: None,
        }
    }
}

/// Get the XDG config directory for parcel.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "parcel").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("parcel.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            currency_symbol: overlay
                .currency_symbol
                .clone()
                .unwrap_or_else(|| self.currency_symbol.clone()),
            color: overlay.color.unwrap_or(self.color),
            manifest: overlay.manifest.clone().or_else(|| self.manifest.clone()),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the manifest path.
    fn expand_paths(&mut self) {
        if let Some(manifest) = &self.manifest {
            let expanded = expand_env_vars(manifest.to_string_lossy().as_ref());
            self.manifest = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit settings file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply PARCEL_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("PARCEL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("currency_symbol") {
            settings.currency_symbol = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }
        if let Ok(val) = config.get_string("manifest") {
            settings.manifest = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for `parcel config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
