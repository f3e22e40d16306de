//! Pipeline configuration
//!
//! Two knobs: the TTL the store under verification is configured with, and
//! the stats reporting cadence. Loadable from a TOML snippet so hosts can
//! ship it alongside their own configuration files.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vigil_core::{Error, Result};

fn default_ttl_millis() -> u64 {
    1_000
}

fn default_report_stat_after_updates() -> u64 {
    1_000
}

/// Configuration for one verification pipeline
///
/// # Example
///
/// ```toml
/// # TTL configured on the store under verification, in milliseconds
/// ttl_millis = 1000
///
/// # Emit an update/clash summary every N processed updates
/// report_stat_after_updates = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// TTL enforced by the store under verification, in milliseconds
    #[serde(default = "default_ttl_millis")]
    pub ttl_millis: u64,
    /// Number of updates between stats log lines
    #[serde(default = "default_report_stat_after_updates")]
    pub report_stat_after_updates: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            ttl_millis: default_ttl_millis(),
            report_stat_after_updates: default_report_stat_after_updates(),
        }
    }
}

impl VerifyConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either knob is zero.
    pub fn new(ttl_millis: u64, report_stat_after_updates: u64) -> Result<Self> {
        let config = Self {
            ttl_millis,
            report_stat_after_updates,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML snippet
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unparseable TOML or out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::invalid_config(format!("bad verify config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either knob is zero.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_millis == 0 {
            return Err(Error::invalid_config("ttl_millis must be > 0"));
        }
        if self.report_stat_after_updates == 0 {
            return Err(Error::invalid_config(
                "report_stat_after_updates must be > 0",
            ));
        }
        Ok(())
    }

    /// The TTL as a `Duration`
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_millis)
    }
}
