//! Client configuration for the workspace service.
//!
//! Reads `~/.config/kbws/config.json`, falling back to environment variables
//! (`KBWS_WORKSPACE_URL`, `KBWS_TOKEN`) for any value the file does not set.
//! Only an already-issued auth token is accepted; logging in is left to the
//! KBase auth service.

use kbws_core::{KbwsError, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WORKSPACE_URL: &str = "https://kbase.us/services/ws";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const ENV_URL: &str = "KBWS_WORKSPACE_URL";
const ENV_TOKEN: &str = "KBWS_TOKEN";

/// Auth token sent verbatim in the `Authorization` header of every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn as_token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Reads and parses a config file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            KbwsError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            KbwsError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Resolved settings used to build a [`crate::WorkspaceClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from a config file and the process environment.
    ///
    /// With `path` unset the default location is used and a missing file is
    /// not an error. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ConfigFile::read(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => ConfigFile::read(&path)?,
                _ => {
                    tracing::debug!("No configuration file found, using environment only");
                    ConfigFile::default()
                }
            },
        };

        Self::resolve(file, |key| env::var(key).ok())
    }

    /// Merges file values with a variable lookup; file values win.
    pub fn resolve(file: ConfigFile, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = file
            .url
            .or_else(|| lookup(ENV_URL))
            .unwrap_or_else(|| DEFAULT_WORKSPACE_URL.to_string());

        let credentials = file
            .token
            .or_else(|| lookup(ENV_TOKEN))
            .filter(|token| !token.trim().is_empty())
            .map(Credentials::token)
            .ok_or_else(|| {
                KbwsError::config(format!(
                    "No auth token found in config.json or the {ENV_TOKEN} environment variable"
                ))
            })?;

        let timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            url,
            credentials,
            timeout,
        })
    }
}

/// Returns the path to the configuration file: ~/.config/kbws/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("kbws").join("config.json"))
}
