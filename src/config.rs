//! Configuration Management
//!
//! Handles persistent configuration storage for vpcshare. Tokens are never
//! written here; see [`crate::api::auth`].

use crate::api::client::{VpcClient, DEFAULT_API_VERSION};
use crate::api::tagging::DEFAULT_TAGGING_ENDPOINT;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Region used when neither flags, config nor environment name one
pub const DEFAULT_REGION: &str = "us-south";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// VPC region, e.g. `us-south`
    #[serde(default)]
    pub region: Option<String>,
    /// Override for the regional VPC endpoint
    #[serde(default)]
    pub vpc_endpoint: Option<String>,
    /// Override for the Global Tagging endpoint
    #[serde(default)]
    pub tagging_endpoint: Option<String>,
    /// VPC API version date
    #[serde(default)]
    pub api_version: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vpcshare").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective region (config > environment > default)
    pub fn effective_region(&self) -> String {
        self.region
            .clone()
            .or_else(crate::api::auth::get_default_region)
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Get effective VPC endpoint (config > regional default)
    pub fn effective_vpc_endpoint(&self, region: &str) -> String {
        self.vpc_endpoint
            .clone()
            .unwrap_or_else(|| VpcClient::regional_endpoint(region))
    }

    pub fn effective_tagging_endpoint(&self) -> String {
        self.tagging_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_TAGGING_ENDPOINT.to_string())
    }

    pub fn effective_api_version(&self) -> String {
        self.api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string())
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Set region and save
    pub fn set_region(&mut self, region: &str) -> Result<()> {
        if !crate::api::auth::validate_region(region) {
            return Err(anyhow!("Invalid region name: {}", region));
        }
        self.region = Some(region.to_string());
        self.save()
    }
}

/// Check that an endpoint is an absolute http(s) URL
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = url::Url::parse(endpoint)
        .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
    match url.scheme() {
        "https" | "http" => Ok(()),
        other => Err(anyhow!("Unsupported endpoint scheme {:?} in {}", other, endpoint)),
    }
}
