//! Block Orientations CLI
//!
//! Inspect how the blocks of a block pack rotate.

use block_orientations::{
    load_block_pack, BlockId, BlockPack, BlockRegistry, OrientationCache, OrientationConfig,
    OrientationTable, RotateDirection,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "block-orientations")]
#[command(author, version, about = "Inspect block orientations in a block pack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rotation mode of a block
    Classify {
        /// Path to block pack (ZIP or directory)
        #[arg(short, long)]
        pack: PathBuf,

        /// Block id or code (e.g., "100" or "game:chair-north")
        #[arg(short, long)]
        block: String,
    },

    /// Print the orientation table of a block
    Table {
        /// Path to block pack (ZIP or directory)
        #[arg(short, long)]
        pack: PathBuf,

        /// Block id or code (e.g., "100" or "game:chair-north")
        #[arg(short, long)]
        block: String,

        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Step through the orientations of a block
    Cycle {
        /// Path to block pack (ZIP or directory)
        #[arg(short, long)]
        pack: PathBuf,

        /// Block id or code (e.g., "100" or "game:chair-north")
        #[arg(short, long)]
        block: String,

        /// Number of steps to take
        #[arg(short, long, default_value = "1")]
        steps: usize,

        /// Direction to step in ("forward", "backward", "next", "prev")
        #[arg(short, long, default_value = "forward")]
        direction: RotateDirection,

        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show information about a block pack
    Info {
        /// Path to block pack (ZIP or directory)
        #[arg(short, long)]
        pack: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { pack, block } => {
            let cache = open_cache(&pack, None)?;
            let id = resolve_block_id(cache.registry(), &block)?;
            let mode = cache.resolve_mode(id);
            println!("{}: {:?}", block, mode);
            println!("  Sibling variants: {}", mode.uses_variants());
            println!("  Mesh angles: {}", mode.uses_mesh_angles());
        }
        Commands::Table {
            pack,
            block,
            config,
        } => {
            let cache = open_cache(&pack, config)?;
            let id = resolve_block_id(cache.registry(), &block)?;
            print_table(cache.registry(), &cache.resolve_table(id));
        }
        Commands::Cycle {
            pack,
            block,
            steps,
            direction,
            config,
        } => {
            let cache = open_cache(&pack, config)?;
            let id = resolve_block_id(cache.registry(), &block)?;

            let mut cursor = cache.cursor_for_placement(id, id);
            println!(
                "Start at [{}] block {} @ {}°",
                cursor.index(),
                cursor.current().placement_block_id,
                cursor.current().mesh_angle_degrees
            );
            for _ in 0..steps {
                let Some(change) = cursor.rotate(direction) else {
                    println!("  no change");
                    continue;
                };
                let marker = if change.variant_changed {
                    " (variant changed)"
                } else {
                    ""
                };
                println!(
                    "  [{}] -> [{}] block {} @ {}°{}",
                    change.previous_index,
                    change.current_index,
                    change.current.placement_block_id,
                    change.current.mesh_angle_degrees,
                    marker
                );
            }
        }
        Commands::Info { pack } => {
            show_pack_info(&pack)?;
        }
    }

    Ok(())
}

fn open_cache(
    pack_path: &PathBuf,
    config_path: Option<PathBuf>,
) -> Result<OrientationCache<BlockPack>, Box<dyn std::error::Error>> {
    let pack = load_block_pack(pack_path)?;
    let config = match config_path {
        Some(path) => OrientationConfig::from_path(path)?,
        None => OrientationConfig::default(),
    };
    Ok(OrientationCache::with_config(pack, config))
}

fn resolve_block_id(pack: &BlockPack, block: &str) -> Result<BlockId, Box<dyn std::error::Error>> {
    if let Ok(id) = block.parse::<BlockId>() {
        return Ok(id);
    }
    pack.block_by_code(block)
        .map(|b| b.id)
        .ok_or_else(|| format!("No block with code {}", block).into())
}

fn print_table(pack: &BlockPack, table: &OrientationTable) {
    println!(
        "Block {} ({:?}), {} orientation(s):",
        table.block_id(),
        table.mode(),
        table.len()
    );
    for (index, def) in table.iter().enumerate() {
        let code = pack
            .block_by_id(def.placement_block_id)
            .map(|b| b.code.as_str())
            .unwrap_or("?");
        println!(
            "  [{}] {} {} @ {}°",
            index, def.placement_block_id, code, def.mesh_angle_degrees
        );
    }
}

fn show_pack_info(pack_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading block pack from {:?}...", pack_path);
    let pack = load_block_pack(pack_path)?;

    println!("Block pack info:");
    println!("  Blocks: {}", pack.block_count());
    println!("  Entity types: {}", pack.entity_type_count());
    println!("  Domains: {:?}", pack.domains());

    let cache = OrientationCache::new(pack);
    let mut counts = std::collections::BTreeMap::new();
    let ids: Vec<BlockId> = cache.registry().blocks().map(|b| b.id).collect();
    for id in ids {
        let mode = format!("{:?}", cache.resolve_mode(id));
        *counts.entry(mode).or_insert(0usize) += 1;
    }
    for (mode, count) in counts {
        println!("  {}: {}", mode, count);
    }

    Ok(())
}
