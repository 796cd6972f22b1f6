//! Configuration for the tasl CLI.
//!
//! Loaded from a TOML file; every field has a default, so a missing file or
//! a partial file is fine. The file is located by, in order:
//!
//! 1. `--config <path>`
//! 2. the `TASL_CONFIG` environment variable
//! 3. `<platform config dir>/tasl/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tasl_core::util::paths::expand_tilde;
use tasl_core::{Error, Result};
use tasl_topics::TagLayout;
use tasl_topics::pair::DEFAULT_EXTENSION;
use tasl_topics::tags::DEFAULT_NAMESPACE;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "TASL_CONFIG";

/// Directory under the platform config dir.
pub const PROJECT_NAME: &str = "tasl";

/// Template basename used by `tasl create` unless overridden.
pub const DEFAULT_TEMPLATE: &str = "template1";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaslConfig {
    /// Extension of wrapper and topic files, without the dot.
    pub extension: String,

    /// Template basename for new topics.
    pub template: String,

    /// Log level used when neither `--log-level` nor `RUST_LOG` is set.
    pub log_level: String,

    /// Tag storage settings.
    pub tags: TagsConfig,
}

/// Tag storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Mapping that held tags in older wrappers.
    pub namespace: String,
}

impl Default for TaslConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            log_level: "info".to_string(),
            tags: TagsConfig::default(),
        }
    }
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl TaslConfig {
    /// Load the config, falling back to defaults when no file exists.
    ///
    /// An explicitly named file that does not exist is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let explicit = config_path.is_some();
        let Some(path) = Self::resolve_config_path(config_path) else {
            log::debug!("No config directory on this platform; using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit {
                return Err(Error::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            log::debug!("No config file at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Parse the config file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// The config file that [`load`](Self::load) would read.
    pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = config_path {
            return Some(expand_tilde(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Some(expand_tilde(&path));
        }
        Self::default_config_path()
    }

    /// `<platform config dir>/tasl/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Tag layout for this configuration.
    pub fn tag_layout(&self) -> TagLayout {
        TagLayout::new(self.tags.namespace.as_str())
    }
}
