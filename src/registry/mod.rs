//! Block registry access.
//!
//! The orientation engine only reads blocks through the [`BlockRegistry`] and
//! [`CapabilityResolver`] traits. [`BlockPack`] is an in-memory implementation
//! of both, loadable from a directory or ZIP archive.

pub mod entity;
pub mod loader;

pub use entity::{EntityCapability, EntityTypeHandle};

use crate::types::{matches_family_pattern, split_code, BlockDescriptor, BlockId};
use std::collections::HashMap;

/// Read access to registered blocks.
pub trait BlockRegistry {
    /// Get a block by id. Unknown ids return `None`.
    fn block_by_id(&self, id: BlockId) -> Option<&BlockDescriptor>;

    /// Get every block in the variant family described by `family_pattern`,
    /// a code whose orientation segment is a wildcard (`game:sign-*-oak`).
    ///
    /// The returned order is authoritative; callers must not re-sort it.
    fn search_sibling_blocks(&self, family_pattern: &str) -> Vec<&BlockDescriptor>;
}

/// Resolves block entity class names to types and probes their capabilities.
pub trait CapabilityResolver {
    /// Resolve a class name. Unknown names return `None`.
    fn resolve_entity_type(&self, class_name: &str) -> Option<EntityTypeHandle>;

    /// Check whether the type supports post-placement transforms.
    fn probe_capability(&self, handle: &EntityTypeHandle) -> bool {
        handle.supports_post_placement_transform()
    }
}

impl<T: BlockRegistry + ?Sized> BlockRegistry for &T {
    fn block_by_id(&self, id: BlockId) -> Option<&BlockDescriptor> {
        (**self).block_by_id(id)
    }

    fn search_sibling_blocks(&self, family_pattern: &str) -> Vec<&BlockDescriptor> {
        (**self).search_sibling_blocks(family_pattern)
    }
}

impl<T: CapabilityResolver + ?Sized> CapabilityResolver for &T {
    fn resolve_entity_type(&self, class_name: &str) -> Option<EntityTypeHandle> {
        (**self).resolve_entity_type(class_name)
    }

    fn probe_capability(&self, handle: &EntityTypeHandle) -> bool {
        (**self).probe_capability(handle)
    }
}

/// A loaded set of block descriptors and entity types.
#[derive(Debug, Default, Clone)]
pub struct BlockPack {
    /// Blocks in registration order.
    blocks: Vec<BlockDescriptor>,

    /// Position in `blocks` by block id.
    by_id: HashMap<BlockId, usize>,

    /// Entity types by class name.
    entity_types: HashMap<String, EntityTypeHandle>,
}

impl BlockPack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block. A block with an id that is already registered replaces it
    /// in place, keeping the original registration position.
    pub fn add_block(&mut self, block: BlockDescriptor) {
        match self.by_id.get(&block.id) {
            Some(&index) => self.blocks[index] = block,
            None => {
                self.by_id.insert(block.id, self.blocks.len());
                self.blocks.push(block);
            }
        }
    }

    /// Add an entity type.
    pub fn add_entity_type(&mut self, handle: EntityTypeHandle) {
        self.entity_types.insert(handle.class_name.clone(), handle);
    }

    /// Iterate over blocks in registration order.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockDescriptor> {
        self.blocks.iter()
    }

    /// Find a block by its full code.
    pub fn block_by_code(&self, code: &str) -> Option<&BlockDescriptor> {
        let wanted = split_code(code);
        self.blocks.iter().find(|b| split_code(&b.code) == wanted)
    }

    /// Get the total number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get the total number of entity types.
    pub fn entity_type_count(&self) -> usize {
        self.entity_types.len()
    }

    /// Get all domains in the pack.
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<_> = self.blocks.iter().map(|b| b.domain()).collect();
        domains.sort();
        domains.dedup();
        domains
    }
}

impl BlockRegistry for BlockPack {
    fn block_by_id(&self, id: BlockId) -> Option<&BlockDescriptor> {
        self.by_id.get(&id).map(|&index| &self.blocks[index])
    }

    /// Siblings are blocks whose code matches the pattern, in registration order.
    fn search_sibling_blocks(&self, family_pattern: &str) -> Vec<&BlockDescriptor> {
        self.blocks
            .iter()
            .filter(|block| matches_family_pattern(family_pattern, &block.code))
            .collect()
    }
}

impl CapabilityResolver for BlockPack {
    fn resolve_entity_type(&self, class_name: &str) -> Option<EntityTypeHandle> {
        self.entity_types.get(class_name).cloned()
    }
}
