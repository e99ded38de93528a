//! Configuration
//!
//! Settings come from defaults, a TOML file, and `LINGUA_*` environment
//! variables (optionally seeded from a `.env` file), in that order of
//! precedence from lowest to highest.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Prefix for every environment variable read by [`I18nConfig::from_env`].
pub const ENV_PREFIX: &str = "LINGUA";

/// Default extension of per-language message files.
pub const DEFAULT_SUFFIX: &str = ".toml";

/// Data sources and file conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Catalog TOML replacing the bundled one
    pub catalog: Option<PathBuf>,
    /// Language registry replacing the bundled one
    pub languages: Option<PathBuf>,
    /// Script registry replacing the bundled one
    pub scripts: Option<PathBuf>,
    /// Region registry replacing the bundled one
    pub regions: Option<PathBuf>,
    /// Extension of message files, including the leading dot
    pub suffix: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            languages: None,
            scripts: None,
            regions: None,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl I18nConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| I18nError::ParseError {
            origin: "configuration".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| I18nError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Defaults overridden by `LINGUA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Apply a `.env` file, then read the environment.
    ///
    /// Without a path, a `.env` in the working directory is used if present.
    pub fn load_dotenv(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| I18nError::Config(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_env()
    }

    /// Layer `LINGUA_*` environment variables over these settings.
    pub fn merge_env(mut self) -> Result<Self> {
        let loader = EnvLoader::new(ENV_PREFIX);
        if let Some(path) = loader.load_var("CATALOG") {
            self.catalog = Some(PathBuf::from(path));
        }
        if let Some(path) = loader.load_var("LANGUAGES") {
            self.languages = Some(PathBuf::from(path));
        }
        if let Some(path) = loader.load_var("SCRIPTS") {
            self.scripts = Some(PathBuf::from(path));
        }
        if let Some(path) = loader.load_var("REGIONS") {
            self.regions = Some(PathBuf::from(path));
        }
        if let Some(suffix) = loader.load_var("SUFFIX") {
            self.suffix = suffix;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the values can be used to name files.
    pub fn validate(&self) -> Result<()> {
        if self.suffix.len() < 2 || !self.suffix.starts_with('.') {
            return Err(I18nError::Config(format!(
                "suffix must start with '.' and name an extension, got '{}'",
                self.suffix
            )));
        }
        if self.suffix.contains(['/', '\\']) {
            return Err(I18nError::Config(format!(
                "suffix must not contain a path separator, got '{}'",
                self.suffix
            )));
        }
        Ok(())
    }

    /// Set the message file extension.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Use a catalog file instead of the bundled catalog.
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }
}

/// Reads prefixed environment variables.
struct EnvLoader {
    prefix: &'static str,
}

impl EnvLoader {
    fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Value of `<PREFIX>_<KEY>`; unset and empty are treated alike.
    fn load_var(&self, key: &str) -> Option<String> {
        env::var(format!("{}_{}", self.prefix, key.to_uppercase()))
            .ok()
            .filter(|value| !value.is_empty())
    }
}
