//! Layered runtime configuration.
//!
//! Values are resolved in order, later layers winning:
//!
//! 1. built-in defaults,
//! 2. an optional YAML file (`PARTCART_CONFIG`, or `partcart.yaml` in the
//!    working directory when present),
//! 3. environment variables, after loading a `.env` file if one exists.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::hotspot::MapperConfig;

const DEFAULT_CONFIG_FILE: &str = "partcart.yaml";
const DEFAULT_STORE_DIR: &str = ".partcart";

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// An environment variable holds a value of the wrong shape.
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// A setting needed by the current command is not configured.
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Assemblies API connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without the `/api/v1/...` path.
    pub base_url: Option<String>,
    /// Static bearer token.
    pub token: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Assemblies API settings.
    pub api: ApiConfig,
    /// Directory holding the persisted cart.
    pub store_dir: PathBuf,
    /// Hotspot rendering constants.
    pub display: MapperConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            display: MapperConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default file location and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or malformed, or an
    /// environment override cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("ignoring unreadable .env file: {e}");
            }
        }

        let file = std::env::var_os("PARTCART_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        let mut config = if file.exists() {
            Self::from_file(&file)?
        } else {
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Reads a YAML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the document does not match the schema.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Applies `PARTCART_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVar`] if a numeric variable does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PARTCART_BASE_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(token) = lookup("PARTCART_API_TOKEN") {
            self.api.token = Some(token);
        }
        if let Some(dir) = lookup("PARTCART_STORE") {
            self.store_dir = PathBuf::from(dir);
        }
        if let Some(v) = parse_var(&lookup, "PARTCART_DISPLAY_WIDTH")? {
            self.display.display_width = v;
        }
        if let Some(v) = parse_var(&lookup, "PARTCART_PADDING")? {
            self.display.padding = v;
        }
        if let Some(v) = parse_var(&lookup, "PARTCART_LAYOUT_OFFSET")? {
            self.display.layout_offset = v;
        }
        if let Some(v) = parse_var(&lookup, "PARTCART_MARKER_SIZE")? {
            self.display.marker_size = v;
        }
        Ok(())
    }

    /// Base URL of the assemblies API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no base URL is configured.
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        let url = self.api.base_url.as_deref();
        url.ok_or(ConfigError::Missing("PARTCART_BASE_URL"))
    }

    /// Bearer token for the assemblies API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no token is configured.
    pub fn token(&self) -> Result<&str, ConfigError> {
        let token = self.api.token.as_deref();
        token.ok_or(ConfigError::Missing("PARTCART_API_TOKEN"))
    }
}

fn parse_var<F>(lookup: &F, name: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
            _ => Err(ConfigError::InvalidVar { name, value }),
        },
    }
}
