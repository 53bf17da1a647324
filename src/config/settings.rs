use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::markers::{
    CoordinateLookup, DEFAULT_LOOKUP_HOST, DEFAULT_LOOKUP_PORT, DEFAULT_LOOKUP_TIMEOUT,
    DEFAULT_MARKER_COLOR, OfflineLookup, Rgb, TalairachClient,
};

use super::{ConfigError, Result};

/// Viewer settings. Every field has a default, so an empty document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub default_color: Rgb,
    pub labels_on: bool,
    pub lookup: LookupConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_MARKER_COLOR,
            labels_on: true,
            lookup: LookupConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: DEFAULT_LOOKUP_HOST.to_string(),
            port: DEFAULT_LOOKUP_PORT,
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT.as_secs(),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(component) = self
            .default_color
            .iter()
            .find(|component| !(0.0..=1.0).contains(*component))
        {
            return Err(ConfigError::Invalid(format!(
                "default_color components must lie in [0, 1], got {component}"
            )));
        }
        self.lookup.validate()
    }
}

impl LookupConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("lookup.host cannot be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("lookup.port must be non-zero".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "lookup.timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The lookup service these settings describe.
    pub fn build(&self) -> Box<dyn CoordinateLookup> {
        if self.enabled {
            Box::new(TalairachClient::new(
                self.host.trim(),
                self.port,
                self.timeout(),
            ))
        } else {
            Box::new(OfflineLookup)
        }
    }
}
