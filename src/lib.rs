//! # Block Orientations
//!
//! A Rust library for working out which orientations a block can be placed in
//! and stepping a placement preview through them.
//!
//! ## Overview
//!
//! Blocks rotate in one of three ways: through a family of sibling block records
//! (`chair-north`, `chair-east`, ...), through a mesh angle applied to their block
//! entity after placement, or both at once. This library classifies a block into
//! a [`RotationMode`], expands it into an ordered [`OrientationTable`], and lets a
//! brush session walk that table with an [`OrientationCursor`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use block_orientations::{load_block_pack, OrientationCache, RotateDirection};
//!
//! // Load a block pack
//! let pack = load_block_pack("path/to/pack.zip")?;
//!
//! // Create a cache for this registry snapshot
//! let cache = OrientationCache::new(pack);
//!
//! // Walk the orientations of block 100
//! let mut cursor = cache.cursor(100);
//! if let Some(change) = cursor.rotate(RotateDirection::Forward) {
//!     println!("now placing {} at {}°", change.current.placement_block_id,
//!         change.current.mesh_angle_degrees);
//! }
//! ```
//!
//! ## Library Integration
//!
//! For integrating with an existing block registry, implement the
//! [`BlockRegistry`] and [`CapabilityResolver`] traits and hand the registry to
//! an [`OrientationCache`], or use [`classify_block`] and [`build_table`]
//! directly without caching.

pub mod config;
pub mod error;
pub mod orientation;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use config::{HybridLayout, MissingIntervalPolicy, OrientationConfig};
pub use error::{OrientationError, Result};
pub use orientation::{
    find_index_for_block_id, BlockIdJump, ModeClassifier, OrientationCache, OrientationChange,
    OrientationCursor, OrientationTable, RotationInterval, RotationMode, TableBuilder,
};
pub use registry::{
    BlockPack, BlockRegistry, CapabilityResolver, EntityCapability, EntityTypeHandle,
};
pub use types::{BlockDescriptor, BlockId, OrientationDefinition, RotateDirection};

/// Load a block pack from a file path (ZIP or directory).
pub fn load_block_pack<P: AsRef<std::path::Path>>(path: P) -> Result<BlockPack> {
    registry::loader::load_from_path(path)
}

/// Load a block pack from bytes (ZIP data).
pub fn load_block_pack_from_bytes(data: &[u8]) -> Result<BlockPack> {
    registry::loader::load_from_bytes(data)
}

/// Classify a block without caching.
pub fn classify_block<C: CapabilityResolver + ?Sized>(
    resolver: &C,
    block: Option<&BlockDescriptor>,
) -> RotationMode {
    ModeClassifier::new(resolver).classify(block)
}

/// Classify and build the orientation table of a block without caching.
pub fn build_table<R>(registry: &R, config: &OrientationConfig, id: BlockId) -> OrientationTable
where
    R: BlockRegistry + CapabilityResolver + ?Sized,
{
    let block = registry.block_by_id(id);
    let mode = ModeClassifier::new(registry).classify(block);
    match block {
        Some(block) => TableBuilder::new(registry, config).build(block, mode),
        None => OrientationTable::single(id, mode),
    }
}
