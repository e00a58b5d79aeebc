//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/xmldoc/xmldoc.toml`
//! 3. Environment variables: `XMLDOC_*` prefix
//!
//! Command-line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Environment(#[from] ConfigError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Document loaded when no file is given on the command line
    pub source_file: PathBuf,
    /// Render the element tree after the version
    pub render_tree: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from("test_xml.xml"),
            render_tree: false,
        }
    }
}

/// Raw settings for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub source_file: Option<PathBuf>,
    pub render_tree: Option<bool>,
}

/// Get the XDG config directory for xmldoc.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "xmldoc").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("xmldoc.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            source_file: overlay
                .source_file
                .clone()
                .unwrap_or_else(|| self.source_file.clone()),
            render_tree: overlay.render_tree.unwrap_or(self.render_tree),
        }
    }

    /// Load settings with layered precedence (see module docs).
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Like [`Settings::load`], with an explicit global config path.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                debug!(path = %path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply XMLDOC_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("XMLDOC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_string("source_file") {
            settings.source_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("render_tree") {
            settings.render_tree = val;
        }

        Ok(settings)
    }

    /// Serialize settings to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigLoadError> {
        toml::to_string_pretty(self).map_err(|e| ConfigLoadError::Parse {
            path: PathBuf::from("<settings>"),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None).unwrap();
        assert_eq!(settings.source_file, PathBuf::from("test_xml.xml"));
        assert!(!settings.render_tree);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let overlay = RawSettings {
            source_file: None,
            render_tree: Some(true),
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.source_file, PathBuf::from("test_xml.xml"));
        assert!(merged.render_tree);
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings {
            source_file: PathBuf::from("doc.xml"),
            render_tree: true,
        };
        let raw: RawSettings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
