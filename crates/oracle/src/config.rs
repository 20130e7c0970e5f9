//! Configuration for the oracle prefetch engine.
//!
//! This module defines the configuration structure used to parameterize an
//! engine instance. It provides:
//! 1. **Defaults:** Baseline lookahead distance and block geometry.
//! 2. **Structures:** The `OracleConfig` record and the `RequestorId` tag.
//! 3. **Loading:** JSON parsing from strings and files, overrides, and validation.
//!
//! Configuration is supplied as JSON by the host or built with `OracleConfig::default()`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the engine.
mod defaults {
    /// Lookahead distance in trace entries.
    ///
    /// Matches the L2 prefetcher configuration the engine was first tuned on.
    pub const DISTANCE: usize = 250;

    /// Cache block size in bytes (64 bytes).
    pub const BLOCK_SIZE: usize = 64;
}

/// Opaque requester identity stamped on every synthesized request.
///
/// Downstream accounting uses it to attribute prefetch traffic to the cache
/// that issued it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct RequestorId(pub u16);

/// Oracle prefetch engine configuration.
///
/// # Examples
///
/// ```
/// use oracle_prefetch::config::OracleConfig;
///
/// let json = r#"{
///     "prediction_file": "traces/l2.txt",
///     "distance": 16,
///     "block_size": 128,
///     "requestor_id": 3
/// }"#;
///
/// let config = OracleConfig::from_json(json).unwrap();
/// assert_eq!(config.distance, 16);
/// assert_eq!(config.block_size, 128);
/// assert_eq!(config.requestor_id.0, 3);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Recorded access log used as the oracle.
    #[serde(default)]
    pub prediction_file: PathBuf,

    /// Number of trace entries kept synthesized ahead of confirmed progress.
    #[serde(default = "OracleConfig::default_distance")]
    pub distance: usize,

    /// Address alignment granularity in bytes.
    #[serde(default = "OracleConfig::default_block_size")]
    pub block_size: usize,

    /// Identity tag for request accounting.
    #[serde(default)]
    pub requestor_id: RequestorId,
}

impl OracleConfig {
    /// Returns the default lookahead distance.
    const fn default_distance() -> usize {
        defaults::DISTANCE
    }

    /// Returns the default block size in bytes.
    const fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Parses and validates a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed documents and
    /// `ConfigError::InvalidBlockSize` when validation fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` when the file cannot be read, otherwise as
    /// [`OracleConfig::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBlockSize` unless `block_size` is a
    /// non-zero power of two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }

    /// Sets the prediction file (builder style).
    pub fn with_prediction_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.prediction_file = path.into();
        self
    }

    /// Sets the lookahead distance (builder style).
    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the block size (builder style).
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets the requester identity (builder style).
    pub fn with_requestor_id(mut self, requestor_id: RequestorId) -> Self {
        self.requestor_id = requestor_id;
        self
    }

    /// Applies command-line style overrides on top of this configuration.
    ///
    /// Fields set in `overrides` replace the loaded values; `None` fields
    /// keep them. The result is not validated here.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.prediction_file {
            self.prediction_file = path;
        }
        if let Some(distance) = overrides.distance {
            self.distance = distance;
        }
        if let Some(block_size) = overrides.block_size {
            self.block_size = block_size;
        }
        if let Some(id) = overrides.requestor_id {
            self.requestor_id = id;
        }
        self
    }
}

/// Optional per-field replacements for a loaded [`OracleConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replacement prediction file.
    pub prediction_file: Option<PathBuf>,
    /// Replacement lookahead distance.
    pub distance: Option<usize>,
    /// Replacement block size.
    pub block_size: Option<usize>,
    /// Replacement requester identity.
    pub requestor_id: Option<RequestorId>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            prediction_file: PathBuf::new(),
            distance: defaults::DISTANCE,
            block_size: defaults::BLOCK_SIZE,
            requestor_id: RequestorId::default(),
        }
    }
}
