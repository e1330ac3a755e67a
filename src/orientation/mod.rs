//! Orientation resolution and cycling.
//!
//! A block is first classified into a [`RotationMode`], then expanded into an
//! [`OrientationTable`] listing every orientation it can be placed in. An
//! [`OrientationCursor`] walks a table and reports each change;
//! [`OrientationCache`] memoizes classification and table building per block id.

pub mod cache;
pub mod classifier;
pub mod cursor;
pub mod interval;
pub mod table_builder;

pub use cache::OrientationCache;
pub use classifier::ModeClassifier;
pub use cursor::{find_index_for_block_id, BlockIdJump, OrientationChange, OrientationCursor};
pub use interval::RotationInterval;
pub use table_builder::TableBuilder;

use crate::types::{BlockId, OrientationDefinition};
use serde::{Deserialize, Serialize};

/// How a block exposes rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotationMode {
    /// Not rotatable.
    #[default]
    None,
    /// Rotation is a family of sibling block records (north/east/south/west...).
    VariantBased,
    /// Rotation is a mesh angle applied to the block entity after placement.
    Rotatable,
    /// Both sibling records and mesh angles.
    Hybrid,
}

impl RotationMode {
    /// Combine the two independent classification predicates.
    pub fn from_flags(has_orientation_variant: bool, has_rotatable_entity: bool) -> Self {
        match (has_orientation_variant, has_rotatable_entity) {
            (false, false) => RotationMode::None,
            (true, false) => RotationMode::VariantBased,
            (false, true) => RotationMode::Rotatable,
            (true, true) => RotationMode::Hybrid,
        }
    }

    /// Whether orientations come from sibling block records.
    pub fn uses_variants(&self) -> bool {
        matches!(self, RotationMode::VariantBased | RotationMode::Hybrid)
    }

    /// Whether orientations carry mesh angles.
    pub fn uses_mesh_angles(&self) -> bool {
        matches!(self, RotationMode::Rotatable | RotationMode::Hybrid)
    }
}

/// The ordered orientations available for one block.
///
/// Never empty: a block that cannot rotate still has its own id at angle 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationTable {
    block_id: BlockId,
    mode: RotationMode,
    definitions: Vec<OrientationDefinition>,
}

impl OrientationTable {
    /// Create a table. An empty definition list collapses to the single-entry table.
    pub fn new(
        block_id: BlockId,
        mode: RotationMode,
        definitions: Vec<OrientationDefinition>,
    ) -> Self {
        if definitions.is_empty() {
            return Self::single(block_id, mode);
        }
        Self {
            block_id,
            mode,
            definitions,
        }
    }

    /// The table of a block that does not rotate.
    pub fn single(block_id: BlockId, mode: RotationMode) -> Self {
        Self {
            block_id,
            mode,
            definitions: vec![OrientationDefinition::new(block_id, 0.0)],
        }
    }

    /// Id of the block this table was built for.
    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    /// Mode the block was classified as.
    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OrientationDefinition> {
        self.definitions.get(index)
    }

    pub fn definitions(&self) -> &[OrientationDefinition] {
        &self.definitions
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrientationDefinition> {
        self.definitions.iter()
    }

    /// Whether the table offers more than one orientation.
    pub fn is_rotatable(&self) -> bool {
        self.definitions.len() > 1
    }
}
