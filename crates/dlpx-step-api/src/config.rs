//! Global configuration: engine entries and DCT credentials
//!
//! The configuration file maps engine names to connection entries and
//! optionally carries the DCT API endpoint, mirroring the global
//! configuration + credential lookup the steps resolve against:
//!
//! ```toml
//! [engines.prod]
//! address = "https://engine.example.com"
//! username = "admin"
//! password = "secret"
//!
//! [dct]
//! base_url = "https://dct.example.com/v3"
//! api_key = "1.abc..."
//! ```

use std::collections::HashMap;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{
    StepError,
    StepResult,
};

/// Connection entry for a single Delphix Engine (legacy API).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Base address, e.g. `https://engine.example.com`.
    pub address: String,
    pub username: String,
    pub password: SecretString,
    /// Accept self-signed engine certificates.
    #[serde(default)]
    pub insecure: bool,
}

/// Connection entry for the DCT API.
#[derive(Debug, Clone, Deserialize)]
pub struct DctConfig {
    /// Base URL including the API version prefix, e.g.
    /// `https://dct.example.com/v3`.
    pub base_url: String,
    pub api_key: SecretString,
    #[serde(default)]
    pub insecure: bool,
}

/// All engines and DCT credentials known to the build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub engines: HashMap<String, EngineConfig>,
    #[serde(default)]
    pub dct: Option<DctConfig>,
}

impl GlobalConfig {
    pub fn from_toml_str(raw: &str) -> StepResult<Self> {
        toml::from_str(raw).map_err(|e| StepError::InvalidConfig(format!("Bad config: {e}")))
    }

    pub fn engine(&self, name: &str) -> Option<&EngineConfig> {
        self.engines.get(name)
    }

    pub fn engine_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.keys().cloned().collect();
        names.sort();
        names
    }
}

impl EngineConfig {
    /// Base address without a trailing slash, ready for path joining.
    pub fn base_address(&self) -> &str {
        self.address.trim_end_matches('/')
    }
}

impl DctConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
