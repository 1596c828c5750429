/**
 * config.rs
 * Parser for lot.yaml files
 *
 * Format:
 * ```yaml
 * apiVersion: slot-tracker/v1
 * kind: Lot
 * metadata:
 *   name: downtown
 * spec:
 *   capacity: 5
 *   address: fake street
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::errors::TrackerError;
use crate::tracker::SlotTracker;

pub const API_VERSION: &str = "slot-tracker/v1";
pub const KIND: &str = "Lot";
pub const DEFAULT_CONFIG_FILE: &str = "lot.yaml";

/// lot.yaml file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LotConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: LotSpec,
}

/// Lot metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub name: String,
}

/// Lot specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotSpec {
    pub capacity: usize,
    pub address: String,
}

impl LotConfig {
    /// Create a new LotConfig with given values
    ///
    /// # Example
    /// ```
    /// # use slot_tracker::LotConfig;
    /// let config = LotConfig::new("downtown", 5, "fake street");
    /// assert_eq!(config.spec.capacity, 5);
    /// ```
    pub fn new(name: impl Into<String>, capacity: usize, address: impl Into<String>) -> Self {
        LotConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: Metadata { name: name.into() },
            spec: LotSpec {
                capacity,
                address: address.into(),
            },
        }
    }

    /// Load lot.yaml from specified path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrackerError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TrackerError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let content = fs::read_to_string(path)?;

        let config: LotConfig = serde_yaml::from_str(&content).map_err(|e| {
            TrackerError::ParseError(format!("Invalid lot YAML: {}", e))
        })?;

        config.validate()?;

        info!(
            name = %config.metadata.name,
            capacity = config.spec.capacity,
            "lot config loaded"
        );
        Ok(config)
    }

    /// Load lot.yaml from a directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TrackerError> {
        Self::load(dir.as_ref().join(DEFAULT_CONFIG_FILE))
    }

    /// Validate lot.yaml structure
    ///
    /// Ensures:
    /// - apiVersion is "slot-tracker/v1"
    /// - kind is "Lot"
    /// - metadata.name and spec.address are non-empty
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.api_version != API_VERSION {
            return Err(TrackerError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(TrackerError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.metadata.name.trim().is_empty() {
            return Err(TrackerError::ValidationError(
                "metadata.name cannot be empty".to_string(),
            ));
        }

        if self.spec.address.trim().is_empty() {
            return Err(TrackerError::ValidationError(
                "spec.address cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Save lot.yaml to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TrackerError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            TrackerError::SerializationError(format!("Failed to serialize lot config: {}", e))
        })?;

        fs::write(path.as_ref(), yaml)?;

        Ok(())
    }

    /// Build an empty tracker for this lot
    pub fn into_tracker(self) -> SlotTracker {
        SlotTracker::new(self.spec.capacity, self.spec.address)
    }
}
