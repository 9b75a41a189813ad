//! User configuration
//!
//! Optional TOML file at `<config dir>/hammertech-cli/config.toml`
//! (`HAMMERTECH_CONFIG` points elsewhere). Every field is optional; command
//! line flags win over environment variables, which win over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::Region;

/// Environment variable names
pub mod env_keys {
    pub const CONFIG: &str = "HAMMERTECH_CONFIG";
    pub const EMAIL: &str = "HAMMERTECH_EMAIL";
    pub const PASSWORD: &str = "HAMMERTECH_PASSWORD";
    pub const TENANT: &str = "HAMMERTECH_TENANT";
    pub const REGION: &str = "HAMMERTECH_REGION";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub region: Option<Region>,
    pub email: Option<String>,
    pub tenant: Option<String>,
    /// Sheet to read when `--sheet` is not given
    pub sheet: Option<String>,
    pub start_row: Option<usize>,
    /// Auth host override, e.g. a staging server
    pub auth_url: Option<String>,
    /// API host override
    pub api_url: Option<String>,
    /// HTTP request timeout; unset uses the client default
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(env_keys::CONFIG) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("hammertech-cli").join("config.toml"))
    }

    /// Load from the default location. A missing file is an empty config.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Region from flag, then `HAMMERTECH_REGION`, then the file
    pub fn resolve_region(&self, flag: Option<Region>) -> Result<Option<Region>> {
        if flag.is_some() {
            return Ok(flag);
        }
        if let Some(name) = env_value(env_keys::REGION) {
            let region = Region::from_name(&name)
                .with_context(|| format!("Unknown region in {}: {}", env_keys::REGION, name))?;
            return Ok(Some(region));
        }
        Ok(self.region)
    }
}

/// First non-empty value of flag, environment variable, config entry
pub fn resolve(flag: Option<String>, env_key: &str, config: Option<&String>) -> Option<String> {
    flag.filter(|v| !v.trim().is_empty())
        .or_else(|| env_value(env_key))
        .or_else(|| config.filter(|v| !v.trim().is_empty()).cloned())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
