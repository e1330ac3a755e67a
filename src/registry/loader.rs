//! Block pack loading from ZIP files and directories.
//!
//! A pack contains a `blocktypes/` folder of JSON files, each holding one
//! block descriptor or an array of them, and an optional `entities.json`
//! mapping entity class names to their capability lists:
//!
//! ```text
//! pack/
//!   entities.json        { "Generic": ["postPlacementTransform"] }
//!   blocktypes/
//!     chair.json         [{ "id": 100, "code": "game:chair-north", ... }]
//! ```

use super::{BlockPack, EntityCapability, EntityTypeHandle};
use crate::error::{OrientationError, Result};
use crate::types::BlockDescriptor;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const BLOCKTYPES_DIR: &str = "blocktypes";
const ENTITIES_FILE: &str = "entities.json";

/// A blocktype file holds a single descriptor or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockFile {
    Single(BlockDescriptor),
    Multiple(Vec<BlockDescriptor>),
}

impl BlockFile {
    fn into_vec(self) -> Vec<BlockDescriptor> {
        match self {
            BlockFile::Single(b) => vec![b],
            BlockFile::Multiple(b) => b,
        }
    }
}

type EntityFile = HashMap<String, Vec<EntityCapability>>;

/// Load a block pack from a file path.
///
/// Supports both ZIP files and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<BlockPack> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load a block pack from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<BlockPack> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut pack = BlockPack::new();
    let mut found_blocktypes = false;

    // Blocks are collected in sorted entry order so ids registered across
    // files get a stable registration order regardless of archive layout.
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();

    for name in names {
        let mut file = archive.by_name(&name)?;
        if file.is_dir() {
            continue;
        }

        if is_entities_file(&name) {
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            add_entities(&mut pack, &name, &contents);
        } else if is_blocktype_file(&name) {
            found_blocktypes = true;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            add_blocks(&mut pack, &name, &contents);
        }
    }

    if !found_blocktypes {
        return Err(OrientationError::InvalidBlockPack(
            "No blocktypes found in archive".to_string(),
        ));
    }

    Ok(pack)
}

/// Load a block pack from a directory.
fn load_from_directory(path: &Path) -> Result<BlockPack> {
    let mut pack = BlockPack::new();

    let blocktypes_path = path.join(BLOCKTYPES_DIR);
    if !blocktypes_path.is_dir() {
        return Err(OrientationError::InvalidBlockPack(
            "No blocktypes directory found".to_string(),
        ));
    }

    let entities_path = path.join(ENTITIES_FILE);
    if entities_path.is_file() {
        let contents = std::fs::read_to_string(&entities_path)?;
        add_entities(&mut pack, &entities_path.to_string_lossy(), &contents);
    }

    load_json_files_recursive(&blocktypes_path, &mut |name, contents| {
        add_blocks(&mut pack, name, contents);
    })?;

    Ok(pack)
}

/// Recursively visit every JSON file under a directory, in sorted order.
fn load_json_files_recursive<F>(dir: &Path, callback: &mut F) -> Result<()>
where
    F: FnMut(&str, &str),
{
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            load_json_files_recursive(&path, callback)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            let contents = std::fs::read_to_string(&path)?;
            callback(&path.to_string_lossy(), &contents);
        }
    }

    Ok(())
}

fn add_blocks(pack: &mut BlockPack, name: &str, contents: &str) {
    match serde_json::from_str::<BlockFile>(contents) {
        Ok(file) => {
            for block in file.into_vec() {
                pack.add_block(block);
            }
        }
        Err(e) => {
            log::warn!("Failed to parse blocktype file {}: {}", name, e);
        }
    }
}

fn add_entities(pack: &mut BlockPack, name: &str, contents: &str) {
    match serde_json::from_str::<EntityFile>(contents) {
        Ok(entities) => {
            for (class_name, capabilities) in entities {
                let mut handle = EntityTypeHandle::new(class_name);
                handle.capabilities.extend(capabilities);
                pack.add_entity_type(handle);
            }
        }
        Err(e) => {
            log::warn!("Failed to parse entity file {}: {}", name, e);
        }
    }
}

/// `blocktypes/**.json`, optionally nested under a single top-level folder.
fn is_blocktype_file(name: &str) -> bool {
    if !name.ends_with(".json") {
        return false;
    }
    let parts: Vec<&str> = name.split('/').collect();
    matches!(parts.iter().position(|p| *p == BLOCKTYPES_DIR), Some(0) | Some(1))
}

fn is_entities_file(name: &str) -> bool {
    let parts: Vec<&str> = name.split('/').collect();
    parts.len() <= 2 && parts.last() == Some(&ENTITIES_FILE)
}
