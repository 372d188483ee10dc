//! Layered configuration loader.
//!
//! Precedence, lowest first:
//! 1. Defaults (`GiteaSettings::default()`)
//! 2. File config (`$ISSUEBOARD_HOME/config.toml`, `[gitea]` table)
//! 3. Environment overrides (`ISSUEBOARD_*` variables)
//!
//! An API key still missing after the three layers is looked up in the OS
//! keyring under the configured domain.
//!
//! ## Example
//!
//! ```no_run
//! use issueboard_core::config_loader::ConfigLoader;
//! use std::path::PathBuf;
//!
//! let settings = ConfigLoader::new()
//!     .with_home(PathBuf::from("/home/me/.issueboard"))
//!     .load()?;
//! # Ok::<(), issueboard_core::ConfigLoadError>(())
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config_types::{GiteaSettings, MAX_PAGE_SIZE};
use crate::secrets;

/// Module name used for the keyring entry and the config table.
pub const MODULE_NAME: &str = "gitea";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// I/O error reading config file
    #[error("I/O error loading config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Config validation error: {0}")]
    Validation(String),

    /// Invalid environment variable value
    #[error("Invalid value for ${var}: '{value}' (expected: {expected})")]
    InvalidEnvValue {
        var: String,
        value: String,
        expected: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    gitea: Option<GiteaSettings>,
}

/// Builder for layered settings loading.
pub struct ConfigLoader {
    home: Option<PathBuf>,
    env_prefix: String,
    skip_file: bool,
    skip_env: bool,
    skip_secret_store: bool,
}

impl ConfigLoader {
    /// Create a loader with every layer enabled and the `ISSUEBOARD`
    /// environment prefix.
    pub fn new() -> Self {
        Self {
            home: None,
            env_prefix: "ISSUEBOARD".to_string(),
            skip_file: false,
            skip_env: false,
            skip_secret_store: false,
        }
    }

    /// Set the configuration directory explicitly.
    ///
    /// If not set, `$ISSUEBOARD_HOME` is used, defaulting to `~/.issueboard`.
    pub fn with_home(mut self, path: PathBuf) -> Self {
        self.home = Some(path);
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip loading from config file (only use defaults + env).
    pub fn skip_file_layer(mut self) -> Self {
        self.skip_file = true;
        self
    }

    /// Skip environment variable overrides (only use defaults + file).
    pub fn skip_env_layer(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Never consult the OS keyring.
    pub fn skip_secret_store(mut self) -> Self {
        self.skip_secret_store = true;
        self
    }

    /// Load settings with all enabled layers, then validate them.
    ///
    /// # Errors
    ///
    /// - Io: file exists but is not readable
    /// - TomlParse: invalid TOML syntax
    /// - InvalidEnvValue: an override does not parse
    /// - Validation: resolved settings are unusable
    pub fn load(self) -> Result<GiteaSettings, ConfigLoadError> {
        let mut settings = GiteaSettings::default();

        if !self.skip_file {
            let home = self.resolve_home()?;
            if let Some(file_settings) = Self::load_from_file(&home)? {
                settings = file_settings;
            }
        }

        if !self.skip_env {
            Self::apply_env_overrides(&mut settings, &self.env_prefix)?;
        }

        if !self.skip_secret_store
            && settings.api_key.is_empty()
            && let Some(key) = secrets::load_api_key(MODULE_NAME, &settings.domain)
        {
            tracing::debug!("API key loaded from secret store for {}", settings.domain);
            settings.api_key = key;
        }

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Resolve the configuration directory.
    ///
    /// Priority:
    /// 1. Explicit home from builder
    /// 2. `$ISSUEBOARD_HOME`
    /// 3. `~/.issueboard`
    pub fn resolve_home(&self) -> Result<PathBuf, ConfigLoadError> {
        if let Some(ref path) = self.home {
            return Ok(path.clone());
        }

        if let Ok(path) = env::var("ISSUEBOARD_HOME") {
            return Ok(PathBuf::from(path));
        }

        dirs::home_dir()
            .map(|home| home.join(".issueboard"))
            .ok_or_else(|| ConfigLoadError::Validation("Cannot determine home directory".to_string()))
    }

    /// Read `config.toml` from `home`.
    ///
    /// Returns `None` when the file or its `[gitea]` table is absent; a
    /// missing file is not an error.
    pub fn load_from_file(home: &Path) -> Result<Option<GiteaSettings>, ConfigLoadError> {
        let config_path = home.join("config.toml");

        let contents = match std::fs::read_to_string(&config_path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("config.toml not found at {:?}, using defaults", config_path);
                return Ok(None);
            }
            Err(e) => return Err(ConfigLoadError::Io(e)),
        };

        Self::parse_toml(&contents)
    }

    /// Parse the file contents. Tables other than `[gitea]` are ignored so
    /// the file can be shared with other tools.
    pub fn parse_toml(contents: &str) -> Result<Option<GiteaSettings>, ConfigLoadError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.gitea)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported environment variables:
    /// - `{PREFIX}_GITEA_TOKEN` - API key, used only when none is configured
    /// - `{PREFIX}_GITEA_DOMAIN` - Override the instance URL
    /// - `{PREFIX}_REFRESH_INTERVAL` - Override the refresh interval (seconds)
    pub fn apply_env_overrides(
        settings: &mut GiteaSettings,
        prefix: &str,
    ) -> Result<(), ConfigLoadError> {
        let token_var = format!("{prefix}_GITEA_TOKEN");
        if settings.api_key.is_empty()
            && let Ok(value) = env::var(&token_var)
            && !value.trim().is_empty()
        {
            tracing::debug!("Applying env override: {}=<redacted>", token_var);
            settings.api_key = value.trim().to_string();
        }

        let domain_var = format!("{prefix}_GITEA_DOMAIN");
        if let Ok(value) = env::var(&domain_var)
            && !value.trim().is_empty()
        {
            tracing::debug!("Applying env override: {}={}", domain_var, value);
            settings.domain = value.trim().to_string();
        }

        let interval_var = format!("{prefix}_REFRESH_INTERVAL");
        if let Ok(value) = env::var(&interval_var) {
            match value.trim().parse::<u64>() {
                Ok(secs) => {
                    tracing::debug!("Applying env override: {}={}", interval_var, secs);
                    settings.refresh_interval_secs = secs;
                }
                Err(_) => {
                    return Err(ConfigLoadError::InvalidEnvValue {
                        var: interval_var,
                        value,
                        expected: "whole number of seconds".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Reject settings the widget cannot work with.
    pub fn validate(settings: &GiteaSettings) -> Result<(), ConfigLoadError> {
        if !(1..=MAX_PAGE_SIZE).contains(&settings.page_size) {
            return Err(ConfigLoadError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                settings.page_size
            )));
        }

        if settings.refresh_interval_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "refresh_interval_secs must be positive".to_string(),
            ));
        }

        Url::parse(&settings.domain).map_err(|e| {
            ConfigLoadError::Validation(format!("domain '{}' is not a URL: {e}", settings.domain))
        })?;

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
