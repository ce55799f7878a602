// monolith-update-config/src/config.rs
// ============================================================================
// Module: Monolith Update Configuration
// Description: Configuration loading and validation for the update service.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. Missing or invalid configuration fails closed before the server
//! binds; nothing here applies a permissive default to a malformed value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "monolith-update.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "MONOLITH_UPDATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default bind address for the API server.
const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default scheme used in synthesized download URLs.
const DEFAULT_PUBLIC_SCHEME: &str = "http";
/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Default storage root for the artifact store.
const DEFAULT_STORAGE_ROOT: &str = "wwwroot";
/// Default catalog snapshot path.
const DEFAULT_CATALOG_PATH: &str = "catalog.json";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Update service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSiteConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Artifact storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Catalog source configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Scheme used in synthesized download URLs.
    #[serde(default = "default_public_scheme")]
    pub public_scheme: String,
    /// Fixed public host; empty means the request `Host` header is used.
    #[serde(default)]
    pub public_host: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_scheme: default_public_scheme(),
            public_host: String::new(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Artifact storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding the updates tree.
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog snapshot JSON file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default public scheme.
fn default_public_scheme() -> String {
    DEFAULT_PUBLIC_SCHEME.to_string()
}

/// Returns the default maximum body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default storage root.
fn default_storage_root() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_ROOT)
}

/// Returns the default catalog snapshot path.
fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("config read failed for {path}: {message}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying failure description.
        message: String,
    },
    /// The configuration file exceeds the size limit.
    #[error("config file too large: {actual} bytes (max {max})")]
    TooLarge {
        /// Actual file size in bytes.
        actual: usize,
        /// Maximum allowed size in bytes.
        max: usize,
    },
    /// The configuration file is not valid TOML.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// A configuration value failed validation.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl UpdateSiteConfig {
    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                actual: size,
                max: MAX_CONFIG_FILE_SIZE,
            });
        }
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the environment override or the default name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_ENV_VAR)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from);
        Self::load(&path)
    }

    /// Validates every configuration value, failing closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid(format!("bind address: {}", self.server.bind)))?;
        if self.server.public_scheme != "http" && self.server.public_scheme != "https" {
            return Err(ConfigError::Invalid(format!(
                "public_scheme must be http or https, got {}",
                self.server.public_scheme
            )));
        }
        if self.server.public_host.contains('/') {
            return Err(ConfigError::Invalid("public_host must not contain a path".to_string()));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be non-zero".to_string()));
        }
        validate_path("storage.root", &self.storage.root)?;
        validate_path("catalog.path", &self.catalog.path)?;
        Ok(())
    }

    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid(format!("bind address: {}", self.server.bind)))
    }
}

/// Validates a configured filesystem path.
fn validate_path(field: &str, path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must not be empty")));
    }
    if raw.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds total length limit")));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} component exceeds length limit")));
        }
        if matches!(component, Component::ParentDir) {
            return Err(ConfigError::Invalid(format!("{field} must not traverse upward")));
        }
    }
    Ok(())
}
