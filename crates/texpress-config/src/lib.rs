//! Configuration management for TExpress.
//!
//! Parses `texpress.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [server]
//! port = 7980
//!
//! [bundles]
//! AppBundle = "src/AppBundle"
//!
//! [static.app]
//! bundle = "AppBundle"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `bundles.*` (also expands a leading `~`)

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override debug mode.
    pub debug: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "texpress.toml";

/// Default document root of a static site, relative to its bundle.
pub const DEFAULT_STATIC_ROOT: &str = "Resources/views/static";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Installed bundles (paths are relative strings from TOML).
    bundles: BTreeMap<String, String>,
    /// Static sites by URL slug.
    #[serde(rename = "static")]
    pub sites: BTreeMap<String, StaticSiteConfig>,
    /// Bundle discovery for unknown slugs.
    pub discovery: DiscoveryConfig,

    /// Installed bundles with absolute paths (set after loading).
    #[serde(skip)]
    pub bundles_resolved: BTreeMap<String, PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Show template sources and detailed error pages.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7980,
            debug: true,
        }
    }
}

/// A static site: a document root inside a bundle, served under a slug.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StaticSiteConfig {
    /// Bundle name (e.g., `AppBundle`).
    pub bundle: String,
    /// Document root, relative to the bundle root.
    #[serde(default = "default_static_root")]
    pub root: String,
}

fn default_static_root() -> String {
    DEFAULT_STATIC_ROOT.to_owned()
}

/// Bundle discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Serve `/{short}/` from `{Short}Bundle` when the slug is not configured.
    pub enabled: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`APP_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `texpress.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(debug) = settings.debug {
            self.server.debug = debug;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. Bundles referenced by
    /// static sites are not required to be installed here: a missing bundle
    /// is reported when its site is requested.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_bundles()?;
        self.validate_sites()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_bundles(&self) -> Result<(), ConfigError> {
        for (name, path) in &self.bundles_resolved {
            require_non_empty(name, "bundles key")?;
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "bundles.{name} cannot be empty"
                )));
            }
        }
        Ok(())
    }

    fn validate_sites(&self) -> Result<(), ConfigError> {
        for (slug, site) in &self.sites {
            if slug.is_empty() {
                return Err(ConfigError::Validation(
                    "static site slug cannot be empty".to_owned(),
                ));
            }
            if slug.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "static site slug '{slug}' cannot contain '/'"
                )));
            }
            if slug.starts_with('_') {
                return Err(ConfigError::Validation(format!(
                    "static site slug '{slug}' cannot start with '_'"
                )));
            }
            require_non_empty(&site.bundle, &format!("static.{slug}.bundle"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        for (name, path) in &mut self.bundles {
            *path = expand::expand_path(path, &format!("bundles.{name}"))?;
        }

        Ok(())
    }

    /// Resolve bundle paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.bundles_resolved = self
            .bundles
            .iter()
            .map(|(name, path)| {
                let resolved = if path.is_empty() {
                    PathBuf::new()
                } else {
                    config_dir.join(path)
                };
                (name.clone(), resolved)
            })
            .collect();
    }
}
