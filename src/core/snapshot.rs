//! Screen snapshot for testing and debugging
//!
//! Provides a serializable representation of a composed screen.

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// The text of a screen buffer at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cols: usize,
    pub rows: usize,
    /// One string per row, top to bottom
    pub lines: Vec<String>,
}

impl Snapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            lines: grid.iter().map(|row| row.text()).collect(),
        }
    }

    /// The snapshot as the same text `render` produces
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
