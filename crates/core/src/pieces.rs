//! Pieces module - tetromino shapes and bounding-box rotation
//!
//! A shape is four `(row, col)` offsets relative to the piece origin. Shapes
//! are values: rotating returns a new shape and never touches the old one.
//!
//! Rotation pivots around the shape's bounding box rather than a per-piece
//! center, so non-square pieces visibly drift by a cell as they turn. Four
//! quarter turns always give the original offsets back.

use crate::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Offset of a single cell relative to the piece origin, as `(row, col)`
pub type CellOffset = (i32, i32);

/// An immutable set of four cell offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    cells: [CellOffset; 4],
}

impl PieceShape {
    pub const fn new(cells: [CellOffset; 4]) -> Self {
        Self { cells }
    }

    /// The catalog shape for a piece kind.
    pub fn of(kind: PieceKind) -> Self {
        let cells = match kind {
            PieceKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            PieceKind::L => [(0, 0), (0, 1), (1, 1), (2, 1)],
            PieceKind::J => [(0, 1), (1, 1), (2, 1), (2, 0)],
            PieceKind::Z => [(0, 1), (1, 0), (1, 1), (2, 0)],
            PieceKind::T => [(0, 1), (1, 0), (1, 1), (2, 1)],
            PieceKind::S => [(0, 0), (1, 0), (1, 1), (2, 1)],
            PieceKind::I => [(0, 1), (1, 1), (2, 1), (3, 1)],
        };
        Self::new(cells)
    }

    pub fn cells(&self) -> &[CellOffset; 4] {
        &self.cells
    }

    /// Largest row or column extent (`max - min`) of the shape.
    pub fn size(&self) -> i32 {
        let (mut min_r, mut max_r) = (i32::MAX, i32::MIN);
        let (mut min_c, mut max_c) = (i32::MAX, i32::MIN);
        for &(r, c) in &self.cells {
            min_r = min_r.min(r);
            max_r = max_r.max(r);
            min_c = min_c.min(c);
            max_c = max_c.max(c);
        }
        (max_r - min_r).max(max_c - min_c)
    }

    /// Quarter turn inside the bounding square: `(r, c) -> (c, size - r)`.
    pub fn rotated(&self) -> Self {
        let size = self.size();
        let mut cells = self.cells;
        for cell in &mut cells {
            let (r, c) = *cell;
            *cell = (c, size - r);
        }
        Self { cells }
    }

    /// Absolute cells for this shape placed at `offset`.
    pub fn place(&self, offset: CellOffset) -> [CellOffset; 4] {
        let mut out = self.cells;
        for cell in &mut out {
            cell.0 = cell.0.saturating_add(offset.0);
            cell.1 = cell.1.saturating_add(offset.1);
        }
        out
    }
}

/// Offset correction that pulls rotated cells back inside the walls and above
/// the floor.
///
/// Each correction is independent: a negative column shifts right, a column
/// past the right wall shifts left, a row below the floor shifts up. Corner
/// cases combine a horizontal and a vertical shift.
pub fn wall_kick(cells: &[CellOffset; 4]) -> CellOffset {
    let min_col = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let max_col = cells.iter().map(|&(_, c)| c).max().unwrap_or(0);
    let max_row = cells.iter().map(|&(r, _)| r).max().unwrap_or(0);

    let right = 0i32.saturating_sub(min_col.min(0));
    let left = (GRID_WIDTH as i32 - 1).saturating_sub(max_col).min(0);
    let up = (GRID_HEIGHT as i32 - 1).saturating_sub(max_row).min(0);

    (up, right.saturating_add(left))
}
