//! Block to rotation mode classification.

use super::RotationMode;
use crate::registry::CapabilityResolver;
use crate::types::BlockDescriptor;

/// Classifies blocks by how they rotate.
pub struct ModeClassifier<'a, C: ?Sized> {
    resolver: &'a C,
}

impl<'a, C: CapabilityResolver + ?Sized> ModeClassifier<'a, C> {
    pub fn new(resolver: &'a C) -> Self {
        Self { resolver }
    }

    /// Classify a block. A missing block is not rotatable.
    pub fn classify(&self, block: Option<&BlockDescriptor>) -> RotationMode {
        let Some(block) = block else {
            return RotationMode::None;
        };

        let mode = RotationMode::from_flags(
            block.has_orientation_variant(),
            self.has_rotatable_entity(block),
        );
        log::debug!("Classified {} ({}) as {:?}", block.code, block.id, mode);
        mode
    }

    /// Whether the block's entity class resolves to a type that supports
    /// post-placement transforms. Resolution failures count as `false`.
    pub fn has_rotatable_entity(&self, block: &BlockDescriptor) -> bool {
        let Some(class_name) = block
            .entity_class
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return false;
        };

        match self.resolver.resolve_entity_type(class_name) {
            Some(handle) => self.resolver.probe_capability(&handle),
            None => {
                log::debug!(
                    "Entity class {} of {} did not resolve; treating as not rotatable",
                    class_name,
                    block.code
                );
                false
            }
        }
    }
}
