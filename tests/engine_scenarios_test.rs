//! Gameplay scenarios driven through the shared engine.

use stacker::core::{
    GameState, Grid, MoveOutcome, RandomSource, RotateOutcome, ScriptedRng, SimpleRng,
};
use stacker::engine::GameEngine;
use stacker::types::{PieceKind, COLOR_COUNT, GRID_HEIGHT, GRID_WIDTH};

fn engine_on(grid: Grid, pieces: &[(PieceKind, u8)]) -> GameEngine<ScriptedRng> {
    GameEngine::from_state(GameState::with_grid(grid, ScriptedRng::pieces(pieces)))
}

/// Bottom row full except `gap`.
fn bottom_row_with_gap(gap: i32) -> Grid {
    let mut grid = Grid::new();
    for col in 0..GRID_WIDTH as i32 {
        if col != gap {
            grid.set(GRID_HEIGHT as i32 - 1, col, 3);
        }
    }
    grid
}

fn active_cells<R: RandomSource>(engine: &GameEngine<R>) -> [(i32, i32); 4] {
    engine.snapshot().active.unwrap().cells
}

#[test]
fn i_piece_falls_and_locks_on_bottom_row() {
    let engine = engine_on(Grid::new(), &[(PieceKind::I, 2), (PieceKind::O, 1)]);
    assert_eq!(active_cells(&engine), [(-2, 6), (-1, 6), (0, 6), (1, 6)]);

    let mut moves = 0;
    let event = loop {
        match engine.move_by(1, 0) {
            MoveOutcome::Moved => moves += 1,
            MoveOutcome::Locked(event) => break event,
            other => panic!("unexpected outcome {other:?}"),
        }
    };

    assert_eq!(moves, 18);
    assert_eq!(event.kind, PieceKind::I);
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(engine.score(), 0);
    for row in 16..20 {
        assert_eq!(engine.color_at(row, 6), 2);
    }
    // The next piece is falling.
    assert_eq!(engine.snapshot().active.unwrap().kind, PieceKind::O);
}

#[test]
fn completing_a_row_scores_forty() {
    let engine = engine_on(bottom_row_with_gap(6), &[(PieceKind::I, 2)]);
    while engine.move_by(1, 0) == MoveOutcome::Moved {}

    assert_eq!(engine.score(), 40);
    assert_eq!(engine.lines_cleared(), 1);
    assert_eq!(engine.level(), 0);
    // The rest of the I slid down into the cleared row.
    assert_eq!(engine.color_at(19, 6), 2);
    assert_eq!(engine.color_at(17, 6), 2);
    assert_eq!(engine.color_at(16, 6), 0);
    assert_eq!(engine.color_at(19, 0), 0);
}

#[test]
fn level_multiplier_uses_level_before_clear() {
    let mut grid = Grid::new();
    for row in 16..20 {
        for col in 0..GRID_WIDTH as i32 {
            if col != 6 {
                grid.set(row, col, 1);
            }
        }
    }
    let engine = engine_on(grid, &[(PieceKind::I, 4)]);

    engine.instant_drop();
    assert!(matches!(engine.move_by(1, 0), MoveOutcome::Locked(e) if e.lines_cleared == 4));
    assert_eq!(engine.score(), 1200);
    assert_eq!(engine.level(), 0);

    // Fifth line: scored at level 0, then the level rises.
    engine.with_state(|s| *s.grid_mut() = bottom_row_with_gap(6));
    engine.instant_drop();
    engine.move_by(1, 0);
    assert_eq!(engine.score(), 1240);
    assert_eq!(engine.lines_cleared(), 5);
    assert_eq!(engine.level(), 1);

    // Sixth line: doubled.
    engine.with_state(|s| *s.grid_mut() = bottom_row_with_gap(6));
    engine.instant_drop();
    engine.move_by(1, 0);
    assert_eq!(engine.score(), 1320);
    assert_eq!(engine.level(), 1);
}

#[test]
fn left_wall_stops_piece() {
    let engine = engine_on(Grid::new(), &[(PieceKind::O, 1)]);
    for _ in 0..5 {
        assert_eq!(engine.move_by(0, -1), MoveOutcome::Moved);
    }
    let at_wall = active_cells(&engine);
    assert_eq!(at_wall.iter().map(|&(_, c)| c).min(), Some(0));

    for _ in 0..3 {
        assert_eq!(engine.move_by(0, -1), MoveOutcome::Blocked);
    }
    assert_eq!(active_cells(&engine), at_wall);
}

#[test]
fn lock_that_leaves_no_room_to_spawn_ends_game() {
    let mut grid = Grid::new();
    for row in 2..GRID_HEIGHT as i32 {
        grid.set(row, 6, 4);
    }
    let engine = engine_on(grid, &[(PieceKind::O, 1), (PieceKind::I, 2)]);

    let event = loop {
        match engine.move_by(1, 0) {
            MoveOutcome::Moved => {}
            MoveOutcome::Locked(event) => break event,
            other => panic!("unexpected outcome {other:?}"),
        }
    };

    assert!(event.game_over);
    assert_eq!(engine.snapshot().grid[0][6], 1);
    assert!(engine.game_over());
    assert_eq!(engine.move_by(0, 1), MoveOutcome::Halted);
    assert_eq!(engine.instant_drop(), 0);
}

#[test]
fn rotate_after_game_over_starts_new_game() {
    let mut grid = Grid::new();
    grid.set(0, 5, 1);
    grid.set(5, 0, 2);
    let engine = engine_on(grid, &[(PieceKind::O, 1)]);

    assert_eq!(engine.move_by(1, 0), MoveOutcome::ToppedOut);
    assert!(engine.game_over());
    // Nothing of the topped-out piece reached the grid.
    let settled = engine.snapshot().grid.iter().flatten().filter(|&&c| c != 0).count();
    assert_eq!(settled, 2);
    assert_eq!(engine.move_by(0, 1), MoveOutcome::Halted);

    assert_eq!(engine.rotate(), RotateOutcome::Reset);
    assert!(!engine.game_over());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.color_at(5, 0), 0);
    assert_eq!(active_cells(&engine), [(-2, 5), (-2, 6), (-1, 5), (-1, 6)]);
}

#[test]
fn four_rotations_restore_piece() {
    for kind in PieceKind::ALL {
        let engine = engine_on(Grid::new(), &[(kind, 1)]);
        for _ in 0..6 {
            engine.move_by(1, 0);
        }
        let start = engine.snapshot().active;

        for _ in 0..4 {
            assert_eq!(
                engine.rotate(),
                RotateOutcome::Rotated { kicked: false },
                "{kind:?}"
            );
        }
        assert_eq!(engine.snapshot().active, start, "{kind:?}");
    }
}

#[test]
fn rotation_against_wall_is_kicked_inside() {
    let engine = engine_on(Grid::new(), &[(PieceKind::I, 1)]);
    for _ in 0..6 {
        engine.move_by(0, 1);
    }
    engine.move_by(1, 0);
    engine.move_by(1, 0);
    // Vertical I hugging the right wall.
    assert!(active_cells(&engine).iter().all(|&(_, c)| c == 9));

    assert_eq!(engine.rotate(), RotateOutcome::Rotated { kicked: true });
    let cells = active_cells(&engine);
    assert!(cells.iter().all(|&(_, c)| (0..10).contains(&c)));
    assert!(cells.iter().all(|&(r, _)| r == cells[0].0));
}

#[test]
fn random_play_keeps_invariants() {
    let engine = GameEngine::seeded(2024);
    let mut dice = SimpleRng::new(99);
    let mut last_score = 0;

    for _ in 0..5000 {
        let resets = match dice.next_range(6) {
            0 => {
                engine.move_by(0, -1);
                false
            }
            1 => {
                engine.move_by(0, 1);
                false
            }
            2 | 3 => {
                engine.move_by(1, 0);
                false
            }
            4 => engine.rotate() == RotateOutcome::Reset,
            _ => {
                engine.instant_drop();
                false
            }
        };

        let snap = engine.snapshot();
        if resets {
            assert_eq!(snap.score, 0);
        } else {
            assert!(snap.score >= last_score);
        }
        last_score = snap.score;

        assert_eq!(snap.level, snap.lines / 5);
        assert!(snap.grid.iter().flatten().all(|&c| c < COLOR_COUNT));
        if !snap.game_over {
            for (r, c) in snap.active.unwrap().cells {
                assert!((0..10).contains(&c));
                assert!(r < 20);
                assert!(r < 0 || snap.grid[r as usize][c as usize] == 0);
            }
        }
    }
}

#[test]
fn restart_clears_grid_and_score() {
    let engine = engine_on(bottom_row_with_gap(6), &[(PieceKind::I, 2)]);
    while engine.move_by(1, 0) == MoveOutcome::Moved {}
    assert_eq!(engine.score(), 40);

    engine.restart();
    let snap = engine.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.lines, 0);
    assert!(snap.grid.iter().flatten().all(|&c| c == 0));
}
