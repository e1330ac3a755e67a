//! Memoized classification and table building, keyed by block id.

use super::{ModeClassifier, OrientationCursor, OrientationTable, RotationMode, TableBuilder};
use crate::config::OrientationConfig;
use crate::registry::{BlockRegistry, CapabilityResolver};
use crate::types::{BlockDescriptor, BlockId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Caches rotation modes and orientation tables for one registry.
///
/// Results are only valid for the registry snapshot they were computed from;
/// call [`clear`](Self::clear) after the registry reloads. Safe to share
/// across threads when the registry is: concurrent misses for the same id may
/// compute the value twice, and the first insert wins.
pub struct OrientationCache<R> {
    registry: R,
    config: OrientationConfig,
    modes: RwLock<HashMap<BlockId, RotationMode>>,
    tables: RwLock<HashMap<BlockId, Arc<OrientationTable>>>,
}

impl<R: BlockRegistry + CapabilityResolver> OrientationCache<R> {
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, OrientationConfig::default())
    }

    pub fn with_config(registry: R, config: OrientationConfig) -> Self {
        Self {
            registry,
            config,
            modes: RwLock::new(HashMap::new()),
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    /// Rotation mode of a block. Unknown ids are [`RotationMode::None`].
    pub fn resolve_mode(&self, id: BlockId) -> RotationMode {
        if let Some(mode) = self.cached_mode(id) {
            return mode;
        }
        let block = self.registry.block_by_id(id);
        self.mode_for(id, block)
    }

    /// Orientation table of a block. Unknown ids get the single-entry table.
    pub fn resolve_table(&self, id: BlockId) -> Arc<OrientationTable> {
        if let Some(table) = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Arc::clone(table);
        }

        log::debug!("Orientation cache miss for block {}", id);
        let block = self.registry.block_by_id(id);
        let mode = match self.cached_mode(id) {
            Some(mode) => mode,
            None => self.mode_for(id, block),
        };
        let table = match block {
            Some(block) => TableBuilder::new(&self.registry, &self.config).build(block, mode),
            None => OrientationTable::single(id, mode),
        };

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(tables.entry(id).or_insert_with(|| Arc::new(table)))
    }

    /// A cursor over the block's table, starting at the first orientation.
    pub fn cursor(&self, id: BlockId) -> OrientationCursor {
        OrientationCursor::new(self.resolve_table(id))
    }

    /// A cursor over the block's table, starting at the orientation that
    /// places `placed_id` (or the first one if none does).
    pub fn cursor_for_placement(&self, id: BlockId, placed_id: BlockId) -> OrientationCursor {
        OrientationCursor::for_placement(self.resolve_table(id), placed_id)
    }

    /// Forget every cached mode and table.
    pub fn clear(&self) {
        self.modes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        log::debug!("Orientation cache cleared");
    }

    /// Number of cached orientation tables.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
            && self
                .modes
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty()
    }

    fn cached_mode(&self, id: BlockId) -> Option<RotationMode> {
        self.modes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
    }

    fn mode_for(&self, id: BlockId, block: Option<&BlockDescriptor>) -> RotationMode {
        let mode = ModeClassifier::new(&self.registry).classify(block);
        *self
            .modes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert(mode)
    }
}
