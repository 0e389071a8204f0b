//! Grid module - the settled cells of the playing field
//!
//! The grid is a 10x20 array of color indices stored as a flat, row-major
//! array. Coordinates are `(row, col)` with row 0 at the top.
//!
//! Rows above row 0 are not stored. Collision checks treat them as free so a
//! piece can spawn and rotate partially above the visible field.

use arrayvec::ArrayVec;

use crate::types::{Cell, EMPTY, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Row indices removed by a single clear (at most every row).
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The settled cells - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of color indices, row-major order (row * WIDTH + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; GRID_SIZE],
        }
    }

    /// Build a grid from rows, top row first.
    pub fn from_rows(rows: [[Cell; WIDTH]; HEIGHT]) -> Self {
        let mut grid = Self::new();
        for (row, values) in rows.iter().enumerate() {
            let start = row * WIDTH;
            grid.cells[start..start + WIDTH].copy_from_slice(values);
        }
        grid
    }

    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= HEIGHT as i32 || col < 0 || col >= WIDTH as i32 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Color at `(row, col)`, or `None` outside the stored rows and columns.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the color at `(row, col)`.
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece may occupy `(row, col)`.
    ///
    /// Columns outside `[0, WIDTH)` are walls and rows at or below `HEIGHT`
    /// are floor. Rows above the field are always free; everything else is
    /// free when empty.
    pub fn is_cell_free(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= WIDTH as i32 || row >= HEIGHT as i32 {
            return false;
        }
        row < 0 || self.get(row, col) == Some(EMPTY)
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        self.row(row).iter().all(|&cell| cell != EMPTY)
    }

    /// Borrow one row of the grid.
    ///
    /// Panics if `row >= HEIGHT`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Write `color` into every listed cell.
    ///
    /// Cells outside the stored grid are skipped; returns how many were written.
    pub fn fill_cells(&mut self, cells: &[(i32, i32)], color: Cell) -> usize {
        cells
            .iter()
            .filter(|&&(row, col)| self.set(row, col, color))
            .count()
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// The new grid is one empty row per cleared row followed by the surviving
    /// rows in their original order. Returns the cleared row indices, top to
    /// bottom, as they were before compaction.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_row = HEIGHT;

        // Scan bottom to top, sliding surviving rows down to `write_row`.
        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared.push(read_row);
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
            }
        }

        self.cells[..write_row * WIDTH].fill(EMPTY);

        cleared.reverse();
        cleared
    }

    /// Copy the grid into a row-major 2D array.
    pub fn write_rows(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(self.row(row));
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 9), Some(9));
        assert_eq!(Grid::index(1, 0), Some(10));
        assert_eq!(Grid::index(19, 9), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 10), None);
        assert_eq!(Grid::index(20, 0), None);
    }

    #[test]
    fn test_cell_free_asymmetry() {
        let grid = Grid::new();

        // Spawn buffer above the field is free...
        assert!(grid.is_cell_free(-1, 0));
        assert!(grid.is_cell_free(-5, 9));
        // ...but walls and floor are not.
        assert!(!grid.is_cell_free(-1, -1));
        assert!(!grid.is_cell_free(0, 10));
        assert!(!grid.is_cell_free(20, 0));
    }

    #[test]
    fn test_occupied_cell_is_not_free() {
        let mut grid = Grid::new();
        grid.set(19, 4, 2);
        assert!(!grid.is_cell_free(19, 4));
        assert!(grid.is_cell_free(18, 4));
    }

    #[test]
    fn test_clear_preserves_relative_order() {
        let mut grid = Grid::new();
        // Marker rows interleaved with full rows.
        grid.set(15, 0, 1);
        for col in 0..10 {
            grid.set(16, col, 2);
        }
        grid.set(17, 1, 3);
        for col in 0..10 {
            grid.set(18, col, 4);
        }
        grid.set(19, 2, 5);

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16, 18]);

        assert_eq!(grid.get(17, 0), Some(1));
        assert_eq!(grid.get(18, 1), Some(3));
        assert_eq!(grid.get(19, 2), Some(5));
        assert!(grid.row(0).iter().all(|&c| c == EMPTY));
        assert!(grid.row(16).iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_clear_handles_more_than_four_rows() {
        let mut grid = Grid::from_rows([[1; WIDTH]; HEIGHT]);
        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.len(), HEIGHT);
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_fill_cells_skips_virtual_rows() {
        let mut grid = Grid::new();
        let written = grid.fill_cells(&[(-1, 3), (0, 3), (1, 3), (1, 4)], 5);
        assert_eq!(written, 3);
        assert_eq!(grid.get(0, 3), Some(5));
        assert_eq!(grid.get(1, 4), Some(5));
    }
}
