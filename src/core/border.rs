//! Screen border glyphs

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// The eight glyphs used to frame a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top: char,
    pub top_right: char,
    pub left: char,
    pub right: char,
    pub bottom_left: char,
    pub bottom: char,
    pub bottom_right: char,
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::from_array(['┏', '━', '┓', '┃', '┃', '┗', '━', '┛'])
    }
}

impl BorderGlyphs {
    /// Build from glyphs ordered top-left, top, top-right, left, right,
    /// bottom-left, bottom, bottom-right
    pub fn from_array(glyphs: [char; 8]) -> Self {
        let [top_left, top, top_right, left, right, bottom_left, bottom, bottom_right] = glyphs;
        Self {
            top_left,
            top,
            top_right,
            left,
            right,
            bottom_left,
            bottom,
            bottom_right,
        }
    }

    /// The same glyph everywhere
    pub fn uniform(ch: char) -> Self {
        Self::from_array([ch; 8])
    }

    pub fn to_array(&self) -> [char; 8] {
        [
            self.top_left,
            self.top,
            self.top_right,
            self.left,
            self.right,
            self.bottom_left,
            self.bottom,
            self.bottom_right,
        ]
    }

    /// Overwrite the outermost rows and columns of `grid`.
    ///
    /// Drawn top, left, right, bottom; on a one-row or one-column grid the
    /// later edges win.
    pub fn draw(&self, grid: &mut Grid) {
        let (cols, rows) = (grid.cols(), grid.rows());
        if cols == 0 || rows == 0 {
            return;
        }
        let (last_col, last_row) = (cols - 1, rows - 1);

        if let Some(row) = grid.row_mut(0) {
            row.fill(self.top);
        }
        set(grid, 0, 0, self.top_left);
        set(grid, last_col, 0, self.top_right);

        for r in 1..last_row {
            set(grid, 0, r, self.left);
        }
        for r in 1..rows {
            set(grid, last_col, r, self.right);
        }

        if let Some(row) = grid.row_mut(last_row) {
            row.fill(self.bottom);
        }
        set(grid, 0, last_row, self.bottom_left);
        set(grid, last_col, last_row, self.bottom_right);
    }
}

fn set(grid: &mut Grid, col: usize, row: usize, ch: char) {
    if let Some(cell) = grid.cell_mut(col, row) {
        *cell = ch;
    }
}
