//! Grid tests - storage, collision and line clearing

use stacker::core::Grid;
use stacker::types::{GRID_HEIGHT, GRID_WIDTH};

fn fill_row(grid: &mut Grid, row: i32, color: u8) {
    for col in 0..GRID_WIDTH as i32 {
        grid.set(row, col, color);
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);
    assert!(grid.cells().iter().all(|&c| c == 0));
    assert_eq!(grid.cells().len(), 200);
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(20, 0), None);
    assert_eq!(grid.get(0, 10), None);
    assert_eq!(grid.get(19, 9), Some(0));
}

#[test]
fn test_set_outside_grid_is_rejected() {
    let mut grid = Grid::new();
    assert!(!grid.set(-1, 3, 2));
    assert!(!grid.set(20, 3, 2));
    assert!(grid.set(0, 3, 2));
    assert_eq!(grid.get(0, 3), Some(2));
}

#[test]
fn test_virtual_rows_above_field_are_free() {
    let grid = Grid::new();
    for row in -10..0 {
        for col in 0..10 {
            assert!(grid.is_cell_free(row, col));
        }
        assert!(!grid.is_cell_free(row, -1));
        assert!(!grid.is_cell_free(row, 10));
    }
    assert!(!grid.is_cell_free(20, 5));
}

#[test]
fn test_clear_single_row_shifts_above_down() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, 1);
    grid.set(18, 2, 4);
    grid.set(17, 7, 5);

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(grid.get(19, 2), Some(4));
    assert_eq!(grid.get(18, 7), Some(5));
    assert_eq!(grid.get(17, 7), Some(0));
}

#[test]
fn test_clear_non_adjacent_rows_preserves_order() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, 1);
    grid.set(18, 0, 2);
    fill_row(&mut grid, 17, 1);
    grid.set(16, 0, 3);
    fill_row(&mut grid, 15, 1);
    grid.set(14, 0, 4);

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[15, 17, 19]);

    // Survivors keep their relative order at the bottom.
    assert_eq!(grid.get(19, 0), Some(2));
    assert_eq!(grid.get(18, 0), Some(3));
    assert_eq!(grid.get(17, 0), Some(4));
    for row in 0..17 {
        assert!(grid.row(row as usize).iter().all(|&c| c == 0));
    }
}

#[test]
fn test_clear_whole_grid() {
    let mut grid = Grid::new();
    for row in 0..20 {
        fill_row(&mut grid, row, 2);
    }
    assert_eq!(grid.clear_full_rows().len(), 20);
    assert!(grid.cells().iter().all(|&c| c == 0));
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut grid = Grid::new();
    for col in 0..9 {
        grid.set(19, col, 1);
    }
    let before = grid.clone();
    assert!(grid.clear_full_rows().is_empty());
    assert_eq!(grid, before);
}

#[test]
fn test_fill_cells_skips_spawn_buffer() {
    let mut grid = Grid::new();
    let written = grid.fill_cells(&[(-2, 5), (-1, 5), (0, 5), (1, 5)], 3);
    assert_eq!(written, 2);
    assert_eq!(grid.get(0, 5), Some(3));
    assert_eq!(grid.get(1, 5), Some(3));
}
