//! Stepping through an orientation table.

use super::OrientationTable;
use crate::types::{BlockId, OrientationDefinition, RotateDirection};
use std::fmt;
use std::sync::Arc;

/// Emitted whenever a cursor moves to a different index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationChange {
    pub previous_index: usize,
    pub current_index: usize,
    pub previous: OrientationDefinition,
    pub current: OrientationDefinition,
    /// The placed block record changed.
    pub variant_changed: bool,
    /// Only the mesh angle changed; the block record is the same.
    pub mesh_angle_only_changed: bool,
}

impl OrientationChange {
    fn new(
        previous_index: usize,
        current_index: usize,
        previous: OrientationDefinition,
        current: OrientationDefinition,
    ) -> Self {
        let variant_changed = previous.placement_block_id != current.placement_block_id;
        Self {
            previous_index,
            current_index,
            previous,
            current,
            variant_changed,
            mesh_angle_only_changed: !variant_changed,
        }
    }
}

/// Outcome of [`OrientationCursor::try_set_index_for_block_id`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockIdJump {
    /// No orientation places the block; the cursor did not move.
    NotFound,
    /// The cursor already sat on the first orientation placing the block.
    Unchanged,
    /// The cursor moved and emitted this change.
    Moved(OrientationChange),
}

impl BlockIdJump {
    /// Whether an orientation placing the block was found.
    pub fn is_found(&self) -> bool {
        !matches!(self, BlockIdJump::NotFound)
    }

    /// The emitted change, if the cursor moved.
    pub fn change(&self) -> Option<&OrientationChange> {
        match self {
            BlockIdJump::Moved(change) => Some(change),
            _ => None,
        }
    }
}

type Listener = Box<dyn FnMut(&OrientationChange) + Send>;

/// Index of the first definition placing `id`, or 0 when there is none.
pub fn find_index_for_block_id(table: &OrientationTable, id: BlockId) -> usize {
    table
        .iter()
        .position(|def| def.placement_block_id == id)
        .unwrap_or(0)
}

/// A position in one orientation table, owned by a single brush session.
///
/// Every operation that lands on a different index emits exactly one
/// [`OrientationChange`], both as its return value and to subscribed
/// listeners. Landing on the same index emits nothing.
pub struct OrientationCursor {
    table: Arc<OrientationTable>,
    index: usize,
    listeners: Vec<Listener>,
}

impl OrientationCursor {
    /// Start at the first orientation.
    pub fn new(table: Arc<OrientationTable>) -> Self {
        Self {
            table,
            index: 0,
            listeners: Vec::new(),
        }
    }

    /// Start at the orientation that places `placed_id`, or the first one.
    pub fn for_placement(table: Arc<OrientationTable>, placed_id: BlockId) -> Self {
        let index = find_index_for_block_id(&table, placed_id);
        Self {
            table,
            index,
            listeners: Vec::new(),
        }
    }

    pub fn table(&self) -> &OrientationTable {
        &self.table
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The selected orientation.
    pub fn current(&self) -> OrientationDefinition {
        self.definition(self.index)
    }

    /// Register a listener for change events.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&OrientationChange) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Step one orientation forward or backward, wrapping around.
    pub fn rotate(&mut self, direction: RotateDirection) -> Option<OrientationChange> {
        self.set_index(self.index as i64 + direction.delta())
    }

    /// Jump to an index. Any integer is accepted and wrapped into range.
    pub fn set_index(&mut self, index: i64) -> Option<OrientationChange> {
        let len = self.table.len().max(1) as i64;
        self.move_to(index.rem_euclid(len) as usize)
    }

    /// Jump to the first orientation placing `id`.
    ///
    /// Leaves the cursor untouched when no orientation does.
    pub fn try_set_index_for_block_id(&mut self, id: BlockId) -> BlockIdJump {
        let found = self.table.iter().position(|def| def.placement_block_id == id);
        match found {
            Some(index) => match self.move_to(index) {
                Some(change) => BlockIdJump::Moved(change),
                None => BlockIdJump::Unchanged,
            },
            None => BlockIdJump::NotFound,
        }
    }

    fn move_to(&mut self, index: usize) -> Option<OrientationChange> {
        if index == self.index {
            return None;
        }

        let change = OrientationChange::new(
            self.index,
            index,
            self.definition(self.index),
            self.definition(index),
        );
        self.index = index;
        log::trace!(
            "Orientation of block {} moved {} -> {} (variant changed: {})",
            self.table.block_id(),
            change.previous_index,
            change.current_index,
            change.variant_changed
        );

        for listener in &mut self.listeners {
            listener(&change);
        }
        Some(change)
    }

    fn definition(&self, index: usize) -> OrientationDefinition {
        self.table
            .get(index)
            .copied()
            .unwrap_or_else(|| OrientationDefinition::new(self.table.block_id(), 0.0))
    }
}

impl fmt::Debug for OrientationCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrientationCursor")
            .field("table", &self.table)
            .field("index", &self.index)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::RotationMode;
    use std::sync::Mutex;

    fn rotatable_table() -> Arc<OrientationTable> {
        Arc::new(OrientationTable::new(
            100,
            RotationMode::Rotatable,
            [0.0, 90.0, 180.0, 270.0]
                .into_iter()
                .map(|a| OrientationDefinition::new(100, a))
                .collect(),
        ))
    }

    fn hybrid_table() -> Arc<OrientationTable> {
        let definitions = [100, 101]
            .into_iter()
            .flat_map(|id| {
                [0.0, 45.0, 90.0, 135.0]
                    .into_iter()
                    .map(move |a| OrientationDefinition::new(id, a))
            })
            .collect();
        Arc::new(OrientationTable::new(100, RotationMode::Hybrid, definitions))
    }

    fn recorded(cursor: &mut OrientationCursor) -> Arc<Mutex<Vec<OrientationChange>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        cursor.subscribe(move |change| sink.lock().unwrap().push(*change));
        events
    }

    #[test]
    fn test_rotate_forward_full_cycle() {
        let mut cursor = OrientationCursor::new(rotatable_table());
        let events = recorded(&mut cursor);

        for expected in [1, 2, 3, 0] {
            let change = cursor.rotate(RotateDirection::Forward).unwrap();
            assert_eq!(change.current_index, expected);
            assert!(!change.variant_changed);
            assert!(change.mesh_angle_only_changed);
        }

        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current(), OrientationDefinition::new(100, 0.0));
        assert_eq!(events.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_rotate_backward_wraps() {
        let mut cursor = OrientationCursor::new(rotatable_table());
        let change = cursor.rotate(RotateDirection::Backward).unwrap();

        assert_eq!(change.previous_index, 0);
        assert_eq!(change.current_index, 3);
        assert_eq!(cursor.current().mesh_angle_degrees, 270.0);
    }

    #[test]
    fn test_variant_change_between_groups() {
        let mut cursor = OrientationCursor::new(hybrid_table());
        cursor.set_index(3);

        let change = cursor.rotate(RotateDirection::Forward).unwrap();
        assert_eq!(change.previous_index, 3);
        assert_eq!(change.current_index, 4);
        assert!(change.variant_changed);
        assert!(!change.mesh_angle_only_changed);
        assert_eq!(change.previous, OrientationDefinition::new(100, 135.0));
        assert_eq!(change.current, OrientationDefinition::new(101, 0.0));
    }

    #[test]
    fn test_set_index_normalizes() {
        let mut cursor = OrientationCursor::new(hybrid_table());

        cursor.set_index(-1);
        assert_eq!(cursor.index(), 7);
        cursor.set_index(17);
        assert_eq!(cursor.index(), 1);
        cursor.set_index(-16);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_same_index_emits_nothing() {
        let mut cursor = OrientationCursor::new(rotatable_table());
        let events = recorded(&mut cursor);

        assert!(cursor.set_index(0).is_none());
        assert!(cursor.set_index(4).is_none());
        assert_eq!(cursor.try_set_index_for_block_id(100), BlockIdJump::Unchanged);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_entry_table_never_changes() {
        let table = Arc::new(OrientationTable::single(5, RotationMode::None));
        let mut cursor = OrientationCursor::new(table);
        let events = recorded(&mut cursor);

        assert!(cursor.rotate(RotateDirection::Forward).is_none());
        assert!(cursor.rotate(RotateDirection::Backward).is_none());
        assert!(cursor.set_index(42).is_none());
        assert_eq!(cursor.index(), 0);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_try_set_index_for_block_id() {
        let mut cursor = OrientationCursor::new(hybrid_table());
        let events = recorded(&mut cursor);

        let jump = cursor.try_set_index_for_block_id(101);
        assert!(jump.is_found());
        let change = *jump.change().unwrap();
        assert_eq!(change.previous_index, 0);
        assert_eq!(change.current_index, 4);
        assert!(change.variant_changed);
        assert_eq!(cursor.index(), 4);
        assert_eq!(events.lock().unwrap().as_slice(), &[change]);

        assert_eq!(cursor.try_set_index_for_block_id(101), BlockIdJump::Unchanged);

        let jump = cursor.try_set_index_for_block_id(555);
        assert_eq!(jump, BlockIdJump::NotFound);
        assert!(!jump.is_found());
        assert!(jump.change().is_none());
        assert_eq!(cursor.index(), 4);
        assert_eq!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_find_index_for_block_id() {
        let table = hybrid_table();
        assert_eq!(find_index_for_block_id(&table, 100), 0);
        assert_eq!(find_index_for_block_id(&table, 101), 4);
        assert_eq!(find_index_for_block_id(&table, 999), 0);
    }

    #[test]
    fn test_for_placement() {
        let cursor = OrientationCursor::for_placement(hybrid_table(), 101);
        assert_eq!(cursor.index(), 4);
        let cursor = OrientationCursor::for_placement(hybrid_table(), 999);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_variant_based_cycle() {
        let table = Arc::new(OrientationTable::new(
            100,
            RotationMode::VariantBased,
            (100..104).map(|id| OrientationDefinition::new(id, 0.0)).collect(),
        ));
        let mut cursor = OrientationCursor::new(table);

        let ids: Vec<_> = (0..4)
            .map(|_| {
                let change = cursor.rotate(RotateDirection::Forward).unwrap();
                assert!(change.variant_changed);
                change.current.placement_block_id
            })
            .collect();
        assert_eq!(ids, vec![101, 102, 103, 100]);
    }
}
