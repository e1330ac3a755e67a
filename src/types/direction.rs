//! Direction for stepping through orientations.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which way a cursor steps through an orientation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    #[default]
    Forward,
    Backward,
}

impl RotateDirection {
    /// Index offset for one step in this direction.
    pub fn delta(&self) -> i64 {
        match self {
            RotateDirection::Forward => 1,
            RotateDirection::Backward => -1,
        }
    }
}

impl FromStr for RotateDirection {
    type Err = String;

    /// Parse case-insensitively; `next`/`+` and `prev`/`-` are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "next" | "+" => Ok(RotateDirection::Forward),
            "backward" | "previous" | "prev" | "-" => Ok(RotateDirection::Backward),
            _ => Err(format!("unknown rotate direction: {}", s)),
        }
    }
}
