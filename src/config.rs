//! Engine configuration.

use crate::error::{OrientationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a rotatable block without a usable rotation interval turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingIntervalPolicy {
    /// Treat the block as non-rotatable: one orientation at angle 0.
    #[default]
    SingleEntry,
    /// Assume a 90 degree interval: four mesh angles.
    QuarterTurns,
}

/// How hybrid blocks lay out their orientation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HybridLayout {
    /// Every sibling, each with every mesh angle (variant-major, angle-minor).
    #[default]
    Nested,
    /// Only the block's own mesh angles; siblings are ignored.
    MeshOnly,
}

/// Orientation engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrientationConfig {
    /// Fallback for missing or malformed rotation intervals.
    pub missing_interval: MissingIntervalPolicy,
    /// Table layout for blocks that are both variant-based and rotatable.
    pub hybrid_layout: HybridLayout,
}

impl OrientationConfig {
    pub fn with_missing_interval(mut self, policy: MissingIntervalPolicy) -> Self {
        self.missing_interval = policy;
        self
    }

    pub fn with_hybrid_layout(mut self, layout: HybridLayout) -> Self {
        self.hybrid_layout = layout;
        self
    }

    /// Parse a config from JSON. Absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(OrientationError::InvalidConfig(
                "expected a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load a config from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
