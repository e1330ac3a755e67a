//! Orientation table construction.

use super::{OrientationTable, RotationInterval, RotationMode};
use crate::config::{HybridLayout, MissingIntervalPolicy, OrientationConfig};
use crate::registry::BlockRegistry;
use crate::types::{BlockDescriptor, OrientationDefinition, ROTATE_INTERVAL_ATTRIBUTE};

const SECTOR_EPSILON: f32 = 1e-4;

/// Builds orientation tables for classified blocks.
pub struct TableBuilder<'a, R: ?Sized> {
    registry: &'a R,
    config: &'a OrientationConfig,
}

impl<'a, R: BlockRegistry + ?Sized> TableBuilder<'a, R> {
    pub fn new(registry: &'a R, config: &'a OrientationConfig) -> Self {
        Self { registry, config }
    }

    /// Build the table for a block classified as `mode`. Never empty.
    pub fn build(&self, block: &BlockDescriptor, mode: RotationMode) -> OrientationTable {
        let definitions = match mode {
            RotationMode::None => Vec::new(),
            RotationMode::VariantBased => self
                .siblings(block)
                .into_iter()
                .map(|sibling| OrientationDefinition::new(sibling.id, 0.0))
                .collect(),
            RotationMode::Rotatable => self.mesh_only(block),
            RotationMode::Hybrid => match self.config.hybrid_layout {
                HybridLayout::Nested => self.nested(block),
                HybridLayout::MeshOnly => self.mesh_only(block),
            },
        };

        OrientationTable::new(block.id, mode, definitions)
    }

    /// Same block id, one definition per mesh angle.
    fn mesh_only(&self, block: &BlockDescriptor) -> Vec<OrientationDefinition> {
        self.mesh_angles(block)
            .unwrap_or_default()
            .into_iter()
            .map(|angle| OrientationDefinition::new(block.id, angle))
            .collect()
    }

    /// Variant-major, angle-minor: every sibling in discovery order, each
    /// followed through the mesh angles of its own sector.
    ///
    /// With `V` siblings each sibling covers `360 / V` degrees, so the sibling
    /// records provide the coarse turns and mesh angles fill the gaps between
    /// them. Two siblings at `45deg` give `0, 45, 90, 135` per sibling.
    fn nested(&self, block: &BlockDescriptor) -> Vec<OrientationDefinition> {
        let Some(own_angles) = self.mesh_angles(block) else {
            return Vec::new();
        };

        let siblings = self.siblings(block);
        let family: Vec<&BlockDescriptor> = if siblings.is_empty() {
            vec![block]
        } else {
            siblings
        };
        let sector = 360.0 / family.len() as f32;

        let mut definitions = Vec::with_capacity(own_angles.len());
        for sibling in family {
            let sibling_angles = interval_of(sibling).map(|interval| interval.angles());
            let angles = sibling_angles.as_deref().unwrap_or(&own_angles);

            let start = definitions.len();
            definitions.extend(
                angles
                    .iter()
                    .filter(|&&angle| angle < sector - SECTOR_EPSILON)
                    .map(|&angle| OrientationDefinition::new(sibling.id, angle)),
            );
            if definitions.len() == start {
                // every angle excluded from this sector; keep the record itself
                definitions.push(OrientationDefinition::new(sibling.id, 0.0));
            }
        }
        definitions
    }

    /// Siblings in the order the registry returns them. Empty when the
    /// block's code does not contain its orientation value.
    fn siblings(&self, block: &BlockDescriptor) -> Vec<&'a BlockDescriptor> {
        let Some(pattern) = block.family_pattern() else {
            log::debug!("No variant family pattern for {}", block.code);
            return Vec::new();
        };
        let siblings = self.registry.search_sibling_blocks(&pattern);
        if siblings.is_empty() {
            log::debug!("No siblings found for {} under {}", block.code, pattern);
        }
        siblings
    }

    /// Mesh angles from the block's interval attribute, with the configured
    /// fallback when the attribute is missing or malformed.
    fn mesh_angles(&self, block: &BlockDescriptor) -> Option<Vec<f32>> {
        if let Some(interval) = interval_of(block) {
            return Some(interval.angles());
        }

        match block.attribute_str(ROTATE_INTERVAL_ATTRIBUTE) {
            Some(raw) => log::warn!("Malformed rotation interval {:?} on {}", raw, block.code),
            None => log::debug!("No rotation interval on {}", block.code),
        }

        match self.config.missing_interval {
            MissingIntervalPolicy::SingleEntry => None,
            MissingIntervalPolicy::QuarterTurns => Some(RotationInterval::QUARTER_TURNS.angles()),
        }
    }
}

fn interval_of(block: &BlockDescriptor) -> Option<RotationInterval> {
    block
        .attribute_str(ROTATE_INTERVAL_ATTRIBUTE)
        .and_then(RotationInterval::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BlockPack;
    use serde_json::json;

    fn chair(id: u32, dir: &str, interval: Option<&str>) -> BlockDescriptor {
        let block =
            BlockDescriptor::new(id, format!("game:chair-{}", dir)).with_variant("rot", dir);
        match interval {
            Some(i) => block.with_attribute(ROTATE_INTERVAL_ATTRIBUTE, json!(i)),
            None => block,
        }
    }

    fn lantern(interval: Option<&str>) -> BlockDescriptor {
        let block = BlockDescriptor::new(300, "game:lantern").with_entity_class("Generic");
        match interval {
            Some(i) => block.with_attribute(ROTATE_INTERVAL_ATTRIBUTE, json!(i)),
            None => block,
        }
    }

    fn ids_and_angles(table: &OrientationTable) -> Vec<(u32, f32)> {
        table
            .iter()
            .map(|d| (d.placement_block_id, d.mesh_angle_degrees))
            .collect()
    }

    #[test]
    fn test_none_is_single_entry() {
        let pack = BlockPack::new();
        let config = OrientationConfig::default();
        let block = BlockDescriptor::new(5, "game:stone");

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::None);
        assert_eq!(ids_and_angles(&table), vec![(5, 0.0)]);
        assert_eq!(table.block_id(), 5);
    }

    #[test]
    fn test_variant_based_keeps_sibling_order() {
        let mut pack = BlockPack::new();
        for (id, dir) in [(100, "north"), (101, "east"), (102, "south"), (103, "west")] {
            pack.add_block(chair(id, dir, None));
        }
        let config = OrientationConfig::default();
        let block = pack.block_by_id(100).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::VariantBased);
        assert_eq!(
            ids_and_angles(&table),
            vec![(100, 0.0), (101, 0.0), (102, 0.0), (103, 0.0)]
        );
        assert_eq!(table.mode(), RotationMode::VariantBased);
    }

    #[test]
    fn test_variant_based_without_siblings() {
        let pack = BlockPack::new();
        let config = OrientationConfig::default();
        let block = chair(100, "north", None);

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::VariantBased);
        assert_eq!(ids_and_angles(&table), vec![(100, 0.0)]);
    }

    #[test]
    fn test_variant_family_keeps_other_variants() {
        let mut pack = BlockPack::new();
        for (id, dir, wood) in [(1, "north", "oak"), (2, "north", "birch"), (3, "east", "oak")] {
            pack.add_block(
                BlockDescriptor::new(id, format!("game:sign-{}-{}", dir, wood))
                    .with_variant("rot", dir)
                    .with_variant("wood", wood),
            );
        }
        let config = OrientationConfig::default();
        let block = pack.block_by_id(1).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::VariantBased);
        let ids: Vec<_> = table.iter().map(|d| d.placement_block_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_variant_based_without_family_pattern() {
        let mut pack = BlockPack::new();
        pack.add_block(BlockDescriptor::new(1, "game:lamp-n").with_variant("rot", "north"));
        pack.add_block(BlockDescriptor::new(2, "game:lamp-e").with_variant("rot", "east"));
        let config = OrientationConfig::default();
        let block = pack.block_by_id(1).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::VariantBased);
        assert_eq!(ids_and_angles(&table), vec![(1, 0.0)]);
    }

    #[test]
    fn test_rotatable_quarter_turns() {
        let pack = BlockPack::new();
        let config = OrientationConfig::default();

        let table = TableBuilder::new(&pack, &config)
            .build(&lantern(Some("90deg")), RotationMode::Rotatable);
        assert_eq!(
            ids_and_angles(&table),
            vec![(300, 0.0), (300, 90.0), (300, 180.0), (300, 270.0)]
        );
    }

    #[test]
    fn test_rotatable_not45() {
        let pack = BlockPack::new();
        let config = OrientationConfig::default();

        let table = TableBuilder::new(&pack, &config)
            .build(&lantern(Some("22.5degnot45deg")), RotationMode::Rotatable);
        assert_eq!(table.len(), 8);
        assert!(table.iter().all(|d| d.placement_block_id == 300));
        assert!(table.iter().all(|d| (d.mesh_angle_degrees / 45.0).fract() != 0.0));
        assert_eq!(table.get(0).unwrap().mesh_angle_degrees, 22.5);
    }

    #[test]
    fn test_rotatable_missing_interval_degrades() {
        let pack = BlockPack::new();
        let config = OrientationConfig::default();
        let builder = TableBuilder::new(&pack, &config);

        assert_eq!(
            ids_and_angles(&builder.build(&lantern(None), RotationMode::Rotatable)),
            vec![(300, 0.0)]
        );
        assert_eq!(
            ids_and_angles(&builder.build(&lantern(Some("sideways")), RotationMode::Rotatable)),
            vec![(300, 0.0)]
        );
    }

    #[test]
    fn test_rotatable_missing_interval_quarter_turn_policy() {
        let pack = BlockPack::new();
        let config =
            OrientationConfig::default().with_missing_interval(MissingIntervalPolicy::QuarterTurns);

        let table =
            TableBuilder::new(&pack, &config).build(&lantern(None), RotationMode::Rotatable);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(3).unwrap().mesh_angle_degrees, 270.0);
    }

    #[test]
    fn test_hybrid_nested() {
        let mut pack = BlockPack::new();
        pack.add_block(chair(100, "north", Some("45deg")));
        pack.add_block(chair(101, "south", Some("45deg")));
        let config = OrientationConfig::default();
        let block = pack.block_by_id(100).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(
            ids_and_angles(&table),
            vec![
                (100, 0.0),
                (100, 45.0),
                (100, 90.0),
                (100, 135.0),
                (101, 0.0),
                (101, 45.0),
                (101, 90.0),
                (101, 135.0),
            ]
        );
    }

    #[test]
    fn test_hybrid_groups_are_contiguous() {
        let mut pack = BlockPack::new();
        for (id, dir) in [(100, "north"), (101, "east"), (102, "south"), (103, "west")] {
            pack.add_block(chair(id, dir, Some("22.5deg")));
        }
        let config = OrientationConfig::default();
        let block = pack.block_by_id(101).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(table.len(), 4 * 4);
        for (group, chunk) in table.definitions().chunks(4).enumerate() {
            assert!(chunk.iter().all(|d| d.placement_block_id == 100 + group as u32));
            let angles: Vec<f32> = chunk.iter().map(|d| d.mesh_angle_degrees).collect();
            assert_eq!(angles, vec![0.0, 22.5, 45.0, 67.5]);
        }
    }

    #[test]
    fn test_hybrid_sibling_without_interval_uses_own_angles() {
        let mut pack = BlockPack::new();
        pack.add_block(chair(100, "north", Some("90deg")));
        pack.add_block(chair(101, "south", None));
        let config = OrientationConfig::default();
        let block = pack.block_by_id(100).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(
            ids_and_angles(&table),
            vec![(100, 0.0), (100, 90.0), (101, 0.0), (101, 90.0)]
        );
    }

    #[test]
    fn test_hybrid_not45_within_sector() {
        let mut pack = BlockPack::new();
        let dirs = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for (i, dir) in dirs.iter().enumerate() {
            pack.add_block(chair(100 + i as u32, dir, Some("30degnot45deg")));
        }
        let config = OrientationConfig::default();
        let block = pack.block_by_id(100).unwrap().clone();

        // 45 degree sectors: only 30 survives the exclusion below 45
        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(table.len(), 8);
        assert!(table.iter().all(|d| d.mesh_angle_degrees == 30.0));
    }

    #[test]
    fn test_hybrid_empty_sector_keeps_record() {
        let mut pack = BlockPack::new();
        for i in 0..16u32 {
            pack.add_block(chair(100 + i, &format!("d{}", i), Some("22.5degnot45deg")));
        }
        let config = OrientationConfig::default();
        let block = pack.block_by_id(100).unwrap().clone();

        // 22.5 degree sectors hold only angle 0, which the exclusion removes
        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(table.len(), 16);
        assert!(table.iter().all(|d| d.mesh_angle_degrees == 0.0));
        assert_eq!(table.get(15).unwrap().placement_block_id, 115);
    }

    #[test]
    fn test_hybrid_without_interval_degrades() {
        let mut pack = BlockPack::new();
        pack.add_block(chair(100, "north", None));
        pack.add_block(chair(101, "south", None));
        let config = OrientationConfig::default();
        let block = pack.block_by_id(100).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(ids_and_angles(&table), vec![(100, 0.0)]);
        assert_eq!(table.mode(), RotationMode::Hybrid);
    }

    #[test]
    fn test_hybrid_without_siblings_rotates_itself() {
        let pack = BlockPack::new();
        let config = OrientationConfig::default();

        let table = TableBuilder::new(&pack, &config)
            .build(&chair(100, "north", Some("180deg")), RotationMode::Hybrid);
        assert_eq!(ids_and_angles(&table), vec![(100, 0.0), (100, 180.0)]);
    }

    #[test]
    fn test_hybrid_mesh_only_layout() {
        let mut pack = BlockPack::new();
        pack.add_block(chair(100, "north", Some("90deg")));
        pack.add_block(chair(101, "south", Some("90deg")));
        let config = OrientationConfig::default().with_hybrid_layout(HybridLayout::MeshOnly);
        let block = pack.block_by_id(101).unwrap().clone();

        let table = TableBuilder::new(&pack, &config).build(&block, RotationMode::Hybrid);
        assert_eq!(
            ids_and_angles(&table),
            vec![(101, 0.0), (101, 90.0), (101, 180.0), (101, 270.0)]
        );
    }
}
