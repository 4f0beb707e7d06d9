//! CatalogChess - Board configuration
//!
//! Options a host application sets per board: how the board renders and
//! whether every applied move is followed by a consistency check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Render pieces as unicode chess glyphs instead of letters.
    pub unicode_glyphs: bool,
    /// Verify cell/identity and king-cache consistency after each move.
    pub check_consistency: bool,
}

impl BoardConfig {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
