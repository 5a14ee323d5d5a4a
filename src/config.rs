use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::api::BackendConfig;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "storypath.toml";
pub const DEFAULT_DATABASE_FILE: &str = "storypath.db";

/// Client settings, read from `storypath.toml`.
///
/// ```toml
/// # Talk to a PostgREST service...
/// api_url = "https://example.org/rest"
/// # ...or keep everything in a local SQLite file.
/// database = "tours.db"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_url: Option<String>,
    pub database: Option<PathBuf>,
}

impl Config {
    /// Read `path`, or the default file if it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&text).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Values given on the command line or in the environment win over the file.
    pub fn with_overrides(mut self, api_url: Option<String>, database: Option<PathBuf>) -> Self {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if database.is_some() {
            self.database = database;
        }
        self
    }

    /// A remote URL takes precedence; otherwise the local database is used.
    pub fn backend(&self) -> BackendConfig {
        match self.api_url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => BackendConfig::Remote {
                url: url.to_string(),
            },
            None => BackendConfig::Local {
                path: self
                    .database
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE)),
            },
        }
    }
}
