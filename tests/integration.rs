// Integration tests (native) for the `unusual-games` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic
// so they can run under `cargo test` on the host.

use unusual_games::tetris::grid::{
    GRID_HEIGHT, GRID_WIDTH, GridModel, POINTS_PER_LINE, Piece, Step,
};
use unusual_games::tetris::shapes::shape_named;

// Registry sanity: the gallery and the game pages both depend on this data.
#[test]
fn registry_serves_the_gallery_contract() {
    assert!(!unusual_games::GAMES.is_empty());
    let tetris = unusual_games::game_info_by_id(1).expect("tetris entry registered");
    assert_eq!(tetris.name, "Tetris");
    assert!(tetris.enabled);
    assert!(unusual_games::game_info_by_id(424_242).is_none());
}

// Full descent of the O piece: spawn at (4, 0), eighteen legal one-row drops
// down to y=18 (rows 18 and 19 occupied), then the next call settles it and
// spawns a successor.
#[test]
fn o_piece_descends_to_the_floor_then_settles() {
    let mut grid = GridModel::new(5);
    assert!(grid.spawn_from(shape_named("O").unwrap()));
    let piece = grid.active.as_ref().unwrap();
    assert_eq!((piece.x, piece.y), (4, 0));

    for expected_y in 1..=18 {
        assert_eq!(grid.step_down(), Step::Moved);
        assert_eq!(grid.active.as_ref().unwrap().y, expected_y);
    }
    match grid.step_down() {
        Step::Locked {
            cleared: 0,
            game_over: false,
        } => {}
        other => panic!("expected a clean settle, got {other:?}"),
    }
    assert_eq!(grid.cell(4, 18), Some("#f0f000"));
    assert_eq!(grid.cell(5, 19), Some("#f0f000"));
    assert!(grid.active.is_some(), "a new piece spawns after settling");
}

// Row 19 is full except one cell; an upright I dropped into the gap clears
// exactly that row for 100 points, and the leftover I cells slide down a row.
#[test]
fn filling_the_last_gap_in_row_19_clears_it() {
    let mut grid = GridModel::new(5);
    for x in 0..GRID_WIDTH {
        if x != 4 {
            grid.set_cell(x, 19, "#00f000");
        }
    }

    assert!(grid.spawn_from(shape_named("I").unwrap()));
    assert!(grid.rotate(), "stand the I upright");
    // The upright I lives in column 3 of its box; aim that column at x=4.
    assert!(grid.try_move(-2, 0));

    let mut outcome = None;
    for _ in 0..=GRID_HEIGHT {
        match grid.step_down() {
            Step::Moved => {}
            Step::Locked { cleared, game_over } => {
                outcome = Some((cleared, game_over));
                break;
            }
        }
    }
    assert_eq!(outcome, Some((1, false)));
    assert_eq!(grid.score, POINTS_PER_LINE);

    // The green row is gone; what reaches row 19 now is the I's tail.
    assert_eq!(grid.cell(4, 19), Some("#00f0f0"));
    assert_eq!(grid.cell(0, 19), None);
    assert!((0..GRID_WIDTH).all(|x| grid.cell(x, 0).is_none()), "fresh empty row on top");
}

// Game-over path: a spawn into a blocked top resets board and score in place
// and puts a fresh piece on the cleared board.
#[test]
fn spawning_into_a_full_top_resets_the_session_state() {
    let mut grid = GridModel::new(9);
    grid.score = 300;
    for y in 0..2 {
        for x in 0..GRID_WIDTH {
            grid.set_cell(x, y, "#f00000");
        }
    }

    assert!(grid.spawn(), "immediate collision reports game over");
    assert_eq!(grid.score, 0);
    assert!(grid.active.is_some(), "play resumes with a fresh piece");
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            assert_eq!(grid.cell(x, y), None, "cell ({x}, {y}) survived the reset");
        }
    }
}

// Atomicity across operations: a rejected move or rotation leaves the whole
// piece untouched, never a partial application.
#[test]
fn rejected_moves_and_rotations_change_nothing() {
    let mut grid = GridModel::new(11);
    grid.spawn_from(shape_named("Z").unwrap());
    // One block on the leftward path, one on the clockwise footprint.
    grid.set_cell(2, 0, "#a000f0");
    grid.set_cell(4, 2, "#a000f0");
    let before: Piece = grid.active.clone().unwrap();

    assert!(grid.collides(&before, -1, 0), "blocked to the left");
    assert!(!grid.try_move(-1, 0));
    assert_eq!(grid.active.clone().unwrap(), before);

    assert!(!grid.rotate(), "clockwise form lands on a locked cell");
    assert_eq!(grid.active.clone().unwrap(), before);

    // The open direction still commits and carries the whole matrix along.
    assert!(grid.try_move(1, 0));
    let after = grid.active.clone().unwrap();
    assert_eq!(after.x, before.x + 1);
    assert_eq!(after.shape, before.shape);
}

// A long gravity-only run: whatever happens (stacking, clears, game-over
// resets), the piece stays in bounds, the score stays a clear multiple, and
// no full row ever survives a settle.
#[test]
fn long_gravity_run_keeps_invariants() {
    let mut grid = GridModel::new(1234);
    grid.spawn();

    let mut settles = 0u32;
    for _ in 0..2000 {
        if let Step::Locked { .. } = grid.step_down() {
            settles += 1;
        }
        assert_eq!(grid.score % POINTS_PER_LINE, 0);
        if let Some(piece) = grid.active.as_ref() {
            for (x, y) in piece.cells() {
                assert!((0..GRID_WIDTH as i32).contains(&x), "x={x} out of bounds");
                assert!(y < GRID_HEIGHT as i32, "y={y} below the board");
            }
        }
        for y in 0..GRID_HEIGHT {
            assert!(
                (0..GRID_WIDTH).any(|x| grid.cell(x, y).is_none()),
                "full row {y} survived a settle"
            );
        }
    }
    assert!(settles > 50, "2000 gravity steps settle plenty of pieces, got {settles}");
}
