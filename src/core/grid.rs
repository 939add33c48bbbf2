//! Character Grid
//!
//! A 2D grid of single characters. Both client surfaces and the screen
//! buffer are grids; compositing is a clipped copy from one grid to another.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Position;

/// A row of characters in a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<char>,
}

impl Row {
    pub fn new(cols: usize, fill: char) -> Self {
        Self {
            cells: vec![fill; cols],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn fill(&mut self, ch: char) {
        self.cells.fill(ch);
    }

    /// Write `text` over the start of the row, one character per cell.
    ///
    /// Stops at whichever runs out first, the row or the text. Cells past the
    /// end of the text keep their content. Returns the number of cells written.
    pub fn overlay(&mut self, text: &str) -> usize {
        let mut written = 0;
        for (cell, ch) in self.cells.iter_mut().zip(text.chars()) {
            *cell = ch;
            written += 1;
        }
        written
    }

    /// The row as a string
    pub fn text(&self) -> String {
        self.cells.iter().collect()
    }
}

impl From<Vec<char>> for Row {
    fn from(cells: Vec<char>) -> Self {
        Self { cells }
    }
}

/// A rectangular grid of characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// The rows in the grid
    rows: Vec<Row>,
    /// Number of columns
    cols: usize,
}

impl Grid {
    /// Create a grid with every cell set to `fill`
    pub fn new(cols: usize, rows: usize, fill: char) -> Self {
        Self {
            rows: (0..rows).map(|_| Row::new(cols, fill)).collect(),
            cols,
        }
    }

    /// Build a grid from raw rows.
    ///
    /// Returns `None` unless every row has the same length.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.into_iter().map(Row::from).collect(),
            cols,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Get the character at a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.cells.get(col)).copied()
    }

    /// Get a mutable reference to a cell
    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut char> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    /// Get a reference to a row
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Get a mutable reference to a row
    pub fn row_mut(&mut self, row: usize) -> Option<&mut Row> {
        self.rows.get_mut(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Set every cell to `ch`
    pub fn fill(&mut self, ch: char) {
        for row in &mut self.rows {
            row.fill(ch);
        }
    }

    /// Copy `src` onto this grid with its top-left corner at `at`.
    ///
    /// Source cells landing outside this grid, on any side, are dropped.
    /// Copied cells replace whatever was underneath.
    pub fn blit(&mut self, src: &Grid, at: Position) {
        let (x, y) = (at.x as i64, at.y as i64);
        let (cols, rows) = (self.cols as i64, self.rows.len() as i64);

        for (src_row, line) in src.rows.iter().enumerate() {
            let dst_row = y + src_row as i64;
            if dst_row < 0 {
                continue;
            }
            if dst_row >= rows {
                break;
            }
            let dst = &mut self.rows[dst_row as usize].cells;
            for (src_col, &ch) in line.cells.iter().enumerate() {
                let dst_col = x + src_col as i64;
                if dst_col < 0 {
                    continue;
                }
                if dst_col >= cols {
                    break;
                }
                dst[dst_col as usize] = ch;
            }
        }
    }
}

/// Rows joined by newlines, without a trailing newline
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for ch in &row.cells {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
