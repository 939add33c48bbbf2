//! Client surface
//!
//! The drawable part of a client: where it sits, how big it is, what it is
//! filled with, and the characters it currently shows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::geometry::{Position, Size};
use super::grid::Grid;

/// Background a new surface is filled with
pub const DEFAULT_CLIENT_BACKGROUND: char = 'X';

/// A positioned, sized character buffer.
///
/// The buffer always has exactly `size` cells; every resize refills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    position: Position,
    size: Size,
    background: char,
    grid: Grid,
}

impl Surface {
    /// Create a surface filled with [`DEFAULT_CLIENT_BACKGROUND`]
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let size = Size::new(width, height)?;
        Ok(Self {
            position: Position::default(),
            size,
            background: DEFAULT_CLIENT_BACKGROUND,
            grid: Grid::new(width, height, DEFAULT_CLIENT_BACKGROUND),
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn background(&self) -> char {
        self.background
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the character at a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        self.grid.cell(col, row)
    }

    /// Each row as a string, top to bottom
    pub fn lines(&self) -> Vec<String> {
        self.grid.iter().map(|r| r.text()).collect()
    }

    /// Move the top-left corner. No bounds are enforced.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = Position::new(x, y);
    }

    /// Resize and refill with the background. Existing content is discarded.
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<()> {
        self.size = Size::new(width, height)?;
        self.grid = Grid::new(width, height, self.background);
        Ok(())
    }

    /// Change the fill character used by later fills.
    pub fn set_background(&mut self, ch: char) {
        self.background = ch;
    }

    /// Reset every cell to the background
    pub fn fill(&mut self) {
        self.grid.fill(self.background);
    }

    /// Replace the whole buffer.
    ///
    /// `rows` must be exactly `height` rows of `width` characters; anything
    /// else is rejected and the buffer is left as it was.
    pub fn replace_contents(&mut self, rows: Vec<Vec<char>>) -> Result<()> {
        let found_rows = rows.len();
        let found_cols = rows
            .iter()
            .map(Vec::len)
            .find(|&len| len != self.size.width)
            .unwrap_or(self.size.width);

        if found_rows != self.size.height || found_cols != self.size.width {
            return Err(Error::ContentMismatch {
                expected_cols: self.size.width,
                expected_rows: self.size.height,
                found_cols,
                found_rows,
            });
        }

        // Every row is `width` long, so this cannot be ragged
        if let Some(grid) = Grid::from_rows(rows) {
            self.grid = grid;
        }
        Ok(())
    }

    /// Overlay multi-line text starting at the top row.
    ///
    /// Lines past the last row are dropped; each line is clipped like
    /// [`Surface::set_line`].
    pub fn set_contents(&mut self, text: &str) {
        for (index, line) in text.lines().enumerate().take(self.size.height) {
            if let Some(row) = self.grid.row_mut(index) {
                row.overlay(line);
            }
        }
    }

    /// Overlay `text` onto row `index`, keeping cells the text doesn't reach.
    pub fn set_line(&mut self, index: usize, text: &str) -> Result<()> {
        let rows = self.size.height;
        let row = self
            .grid
            .row_mut(index)
            .ok_or(Error::LineOutOfRange { index, rows })?;
        row.overlay(text);
        Ok(())
    }

    /// Serialize the buffer: rows joined by newlines, no trailing newline
    pub fn render(&self) -> String {
        self.grid.to_string()
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
