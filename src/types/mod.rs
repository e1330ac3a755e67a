//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::RotateDirection;
pub use transform::OrientationDefinition;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric block id as assigned by the block registry.
pub type BlockId = u32;

/// Domain assumed for codes written without one.
pub const DEFAULT_DOMAIN: &str = "game";

/// Variant keys that express an orientation.
///
/// Matched case-insensitively. Any other variant key (material, color, ...)
/// is not an orientation axis.
pub const ORIENTATION_VARIANT_KEYS: [&str; 6] = [
    "rot",
    "rotation",
    "horizontalorientation",
    "orientation",
    "v",
    "side",
];

/// Stands in for the orientation segment of a code in a family pattern.
pub const FAMILY_WILDCARD: &str = "*";

/// Block attribute holding the rotation interval string, e.g. `"22.5degnot45deg"`.
pub const ROTATE_INTERVAL_ATTRIBUTE: &str = "rotateInterval";

/// Read-only description of a registered block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    /// Registry id, e.g. `100`.
    pub id: BlockId,
    /// Full code, e.g. `"game:chair-oak-north"`.
    pub code: String,
    /// Variant values, e.g. `{"wood": "oak", "rot": "north"}`.
    #[serde(default)]
    pub variant: HashMap<String, String>,
    /// Free-form attribute bag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Value>,
    /// Name of the block entity class attached to this block, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_class: Option<String>,
}

impl BlockDescriptor {
    pub fn new(id: BlockId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            variant: HashMap::new(),
            attributes: None,
            entity_class: None,
        }
    }

    pub fn with_variant(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variant.insert(key.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let attributes = self
            .attributes
            .get_or_insert_with(|| serde_json::Value::Object(Default::default()));
        if let serde_json::Value::Object(map) = attributes {
            map.insert(key.into(), value);
        }
        self
    }

    pub fn with_entity_class(mut self, class: impl Into<String>) -> Self {
        self.entity_class = Some(class.into());
        self
    }

    /// Get the domain (e.g., "game").
    pub fn domain(&self) -> &str {
        split_code(&self.code).0
    }

    /// Get the code without its domain (e.g., "chair-oak-north").
    pub fn path(&self) -> &str {
        split_code(&self.code).1
    }

    /// Look up a string attribute.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key)?.as_str()
    }

    /// The first orientation variant present, as `(key, value)`.
    ///
    /// Keys are checked in [`ORIENTATION_VARIANT_KEYS`] order so the result is
    /// stable when a block carries more than one.
    pub fn orientation_variant(&self) -> Option<(&str, &str)> {
        ORIENTATION_VARIANT_KEYS.iter().find_map(|wanted| {
            self.variant
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
                .map(|(key, value)| (key.as_str(), value.as_str()))
        })
    }

    /// Whether any variant key is a recognized orientation key.
    pub fn has_orientation_variant(&self) -> bool {
        self.orientation_variant().is_some()
    }

    /// The code with its orientation segment replaced by [`FAMILY_WILDCARD`].
    ///
    /// `game:chair-oak-north` with `rot=north` becomes `game:chair-oak-*`, and
    /// `game:sign-north-oak` becomes `game:sign-*-oak`, so only the orientation
    /// axis varies across the family. When the value occurs more than once the
    /// last occurrence is replaced. Returns `None` when the orientation value is
    /// not a segment of the code.
    pub fn family_pattern(&self) -> Option<String> {
        let (_, value) = self.orientation_variant()?;
        let (domain, path) = split_code(&self.code);
        let mut segments: Vec<&str> = path.split('-').collect();
        let position = segments.iter().rposition(|segment| *segment == value)?;
        segments[position] = FAMILY_WILDCARD;
        Some(format!("{}:{}", domain, segments.join("-")))
    }
}

/// Check a code against a family pattern.
///
/// Codes match when they share the domain and segment count, and every
/// non-wildcard segment is equal. A wildcard matches exactly one non-empty
/// segment.
pub fn matches_family_pattern(pattern: &str, code: &str) -> bool {
    let (pattern_domain, pattern_path) = split_code(pattern);
    let (domain, path) = split_code(code);
    if pattern_domain != domain {
        return false;
    }

    let mut pattern_segments = pattern_path.split('-');
    let mut segments = path.split('-');
    loop {
        match (pattern_segments.next(), segments.next()) {
            (None, None) => return true,
            (Some(FAMILY_WILDCARD), Some(segment)) if !segment.is_empty() => {}
            (Some(expected), Some(segment)) if expected == segment => {}
            _ => return false,
        }
    }
}

/// Split a code into domain and path.
/// "game:chair-north" -> ("game", "chair-north")
/// "chair-north" -> ("game", "chair-north")
pub fn split_code(code: &str) -> (&str, &str) {
    code.split_once(':').unwrap_or((DEFAULT_DOMAIN, code))
}
