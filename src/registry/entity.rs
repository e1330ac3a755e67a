//! Block entity types and the capabilities they advertise.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A behavioral contract a block entity type can fulfil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityCapability {
    /// Accepts a rotation in degrees after placement and rewrites its
    /// persisted attribute tree to match.
    PostPlacementTransform,
    /// Any capability the orientation engine does not act on.
    #[serde(other)]
    Other,
}

/// A resolved block entity type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityTypeHandle {
    /// Class name the type was registered under.
    pub class_name: String,
    /// Capabilities the type supports.
    #[serde(default)]
    pub capabilities: HashSet<EntityCapability>,
}

impl EntityTypeHandle {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            capabilities: HashSet::new(),
        }
    }

    pub fn with_capability(mut self, capability: EntityCapability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn supports(&self, capability: EntityCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether this type can be turned after placement.
    pub fn supports_post_placement_transform(&self) -> bool {
        self.supports(EntityCapability::PostPlacementTransform)
    }
}
