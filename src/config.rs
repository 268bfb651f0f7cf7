//! Configuration for the catalog service.
//!
//! Settings come from an optional `catalog.toml`, then the `FRONT_URL`
//! environment variable, then command-line overrides. Every section and
//! field has a default suitable for local development:
//!
//! - [`Config`] - Root configuration struct
//! - [`ServerConfig`] - Listener, CORS origin and upload limit
//! - [`StorageConfig`] - Backend selection and on-disk locations
//! - [`LogConfig`] - Log output format

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 9000;

/// Default allowed cross-origin front end.
pub const DEFAULT_FRONT_URL: &str = "http://localhost:3000";

/// Default upper bound for a buffered image upload (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Environment variable overriding `server.front_url`.
pub const FRONT_URL_ENV: &str = "FRONT_URL";

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// catalog.toml configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed to call the API from a browser.
    pub front_url: String,
    /// Largest accepted image upload, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            front_url: DEFAULT_FRONT_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Which catalog backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// JSON document rewritten on every add
    #[default]
    Snapshot,
    /// SQLite `items` table
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub images_dir: PathBuf,
    pub snapshot_path: PathBuf,
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            images_dir: PathBuf::from("images"),
            snapshot_path: PathBuf::from("items.json"),
            database_path: PathBuf::from("db/mercari.sqlite3"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields are unknown or have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    ///
    /// The `FRONT_URL` environment variable is applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(front_url) = lookup(FRONT_URL_ENV)
            && !front_url.is_empty()
        {
            self.server.front_url = front_url;
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate configuration with comprehensive checks.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Port 0 or an empty host
    /// - Empty or unparsable CORS origin
    /// - Zero upload limit
    /// - Empty storage paths
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Server
        let server = &self.server;
        if server.host.is_empty() {
            errors.push("server.host cannot be empty".to_string());
        }
        if server.port == 0 {
            errors.push(
                "Server port cannot be 0. Use a valid port number (1-65535)\n  \
                 Default: 9000"
                    .to_string(),
            );
        } else if server.port < 1024 {
            warnings.push(format!(
                "Server port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 9000) to avoid permission issues",
                server.port
            ));
        }

        if server.front_url.is_empty() {
            errors.push("server.front_url cannot be empty".to_string());
        } else if server.front_url.parse::<axum::http::HeaderValue>().is_err() {
            errors.push(format!(
                "server.front_url is not a valid origin: '{}'",
                server.front_url
            ));
        }

        if server.max_upload_bytes == 0 {
            errors.push(
                "server.max_upload_bytes cannot be 0. Default: 10485760 (10 MiB)".to_string(),
            );
        }

        // 2. Storage
        let storage = &self.storage;
        for (field, path) in [
            ("storage.images_dir", &storage.images_dir),
            ("storage.snapshot_path", &storage.snapshot_path),
            ("storage.database_path", &storage.database_path),
        ] {
            if path.as_os_str().is_empty() {
                errors.push(format!("{field} cannot be empty"));
            }
        }

        if !storage.images_dir.as_os_str().is_empty() {
            if !storage.images_dir.exists() {
                warnings.push(format!(
                    "Images directory does not exist: {}\n  \
                     It will be created on startup; add a default.jpg placeholder to it",
                    storage.images_dir.display()
                ));
            } else if !storage.images_dir.is_dir() {
                errors.push(format!(
                    "Images path is not a directory: {}",
                    storage.images_dir.display()
                ));
            }
        }

        // Return errors if any
        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
