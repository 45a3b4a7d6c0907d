//! Session tests - the full state machine from spawn to game over.

use matrix_tetris::core::pieces::{pattern, span};
use matrix_tetris::core::GameState;
use matrix_tetris::types::{
    Angle, Command, Shape, TickResult, DEFAULT_DROP_MS, FULL_ROW, MATRIX_COLS, MATRIX_ROWS,
    ROW_CLEAR_SCORE,
};

fn frame_cells(state: &GameState) -> u32 {
    state.frame().iter().map(|row| row.count_ones()).sum()
}

/// Tick until the piece stops falling, with a sanity cap.
fn tick_until_settled(state: &mut GameState) -> TickResult {
    for _ in 0..2 * MATRIX_ROWS {
        match state.tick() {
            TickResult::Falling => continue,
            result => return result,
        }
    }
    panic!("piece never settled");
}

#[test]
fn test_new_session_spawns_one_tetromino() {
    for seed in 0..100 {
        let state = GameState::new(seed);
        assert!(!state.game_over());
        assert!(state.piece().is_some());
        assert_eq!(state.score(), 0);
        assert_eq!(state.locked_pieces(), 0);
        assert_eq!(state.drop_interval_ms(), DEFAULT_DROP_MS);

        // The spawned pattern fits the board width and has 4 cells.
        assert_eq!(frame_cells(&state), 4, "seed {seed}");
    }
}

#[test]
fn test_piece_falls_then_locks_on_the_floor() {
    let mut state = GameState::new(1);
    state.place_piece(Shape::O, Angle::Deg0, 3);

    // The O piece occupies rows 0-1; six ticks bring it to the floor.
    for _ in 0..6 {
        assert_eq!(state.tick(), TickResult::Falling);
    }
    assert_eq!(state.tick(), TickResult::Locked);

    assert_eq!(state.locked_pieces(), 1);
    let committed = state.board().committed_rows();
    assert_eq!(committed[6], 0x03 << 3);
    assert_eq!(committed[7], 0x03 << 3);

    // A replacement piece is already falling.
    assert!(state.piece().is_some());
    assert!(!state.game_over());
}

#[test]
fn test_completing_a_row_clears_and_scores() {
    let mut state = GameState::new(1);
    // Bottom row is full except the rightmost column.
    state.board_mut().set_committed_row(7, 0xFE);

    // Drop a vertical I down the open column.
    state.place_piece(Shape::I, Angle::Deg0, 0);
    assert_eq!(tick_until_settled(&mut state), TickResult::Cleared(1));

    assert_eq!(state.score(), ROW_CLEAR_SCORE);

    // The three remaining I cells compacted to the bottom.
    let committed = state.board().committed_rows();
    assert_eq!(committed[7], 0x01);
    assert_eq!(committed[6], 0x01);
    assert_eq!(committed[5], 0x01);
    assert_eq!(committed[4], 0x00);
}

#[test]
fn test_score_only_increases_on_clears() {
    let mut state = GameState::new(1);
    state.place_piece(Shape::O, Angle::Deg0, 0);
    assert_eq!(tick_until_settled(&mut state), TickResult::Locked);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_horizontal_moves_through_the_session() {
    let mut state = GameState::new(1);
    state.place_piece(Shape::O, Angle::Deg0, 3);

    assert!(state.apply(Command::MoveRight));
    assert_eq!(state.board().active_rows()[0], 0x03 << 2);

    // Push to the right wall; the final attempt is rejected unchanged.
    while state.apply(Command::MoveRight) {}
    assert_eq!(state.board().active_rows()[0], 0x03);
    assert_eq!(frame_cells(&state), 4);
}

#[test]
fn test_rotation_preserves_cells_for_all_shapes_and_placements() {
    for shape in Shape::ALL {
        for angle in Angle::ALL {
            let width = span(pattern(shape, angle));
            for shift in 0..=(MATRIX_COLS - width) {
                let mut state = GameState::new(1);
                state.place_piece(shape, angle, shift);

                // On an empty board every rotation is legal.
                assert!(
                    state.apply(Command::RotateCw),
                    "{} at {} degrees, shift {shift}",
                    shape.as_str(),
                    angle.as_degrees()
                );
                assert_eq!(frame_cells(&state), 4);
                assert_eq!(state.piece().map(|p| p.angle), Some(angle.cw()));

                // And back again.
                assert!(state.apply(Command::RotateCcw));
                assert_eq!(frame_cells(&state), 4);
                assert_eq!(state.piece().map(|p| p.angle), Some(angle));
            }
        }
    }
}

#[test]
fn test_rotation_wraps_at_270_degrees() {
    let mut state = GameState::new(1);
    state.place_piece(Shape::S, Angle::Deg270, 0);

    assert!(state.apply(Command::RotateCw));
    assert_eq!(state.piece().map(|p| p.angle), Some(Angle::Deg0));

    assert!(state.apply(Command::RotateCcw));
    assert_eq!(state.piece().map(|p| p.angle), Some(Angle::Deg270));
}

#[test]
fn test_rotation_rejects_and_reverts_on_overlap() {
    let mut state = GameState::new(1);
    state.place_piece(Shape::T, Angle::Deg0, 0);
    let before = *state.board().active_rows();

    // The rotated T would need row 2, column 0 - block it.
    state.board_mut().set_committed_row(2, 0x01);

    assert!(!state.apply(Command::RotateCw));
    assert_eq!(state.board().active_rows(), &before);
    assert_eq!(state.piece().map(|p| p.angle), Some(Angle::Deg0));
}

#[test]
fn test_speed_halves_after_five_locked_pieces() {
    let mut state = GameState::new(1);

    for expected_locks in 1..=5 {
        state.place_piece(Shape::I, Angle::Deg90, 0);
        assert_eq!(tick_until_settled(&mut state), TickResult::Locked);
        assert_eq!(state.locked_pieces(), expected_locks);
    }

    assert_eq!(state.drop_interval_ms(), DEFAULT_DROP_MS / 2);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_saturated_board_ends_the_session() {
    let mut state = GameState::new(1);
    for idx in 0..MATRIX_ROWS {
        state.board_mut().set_committed_row(idx, FULL_ROW);
    }

    assert_eq!(state.tick(), TickResult::GameOver);
    assert!(state.game_over());
    assert!(state.piece().is_none());

    // No overlapping active bitmap is left behind.
    assert!(!state.board().is_overlapping());
}

#[test]
fn test_blocked_spawn_ends_the_session() {
    let mut state = GameState::new(1);
    state.place_piece(Shape::O, Angle::Deg0, 3);
    assert_eq!(state.tick(), TickResult::Falling);
    assert_eq!(state.tick(), TickResult::Falling);

    // Top rows nearly full with misaligned free columns: the board is not
    // saturated, yet no pattern can spawn without colliding.
    state.board_mut().set_committed_row(0, 0xFE);
    state.board_mut().set_committed_row(1, 0x7F);

    assert_eq!(tick_until_settled(&mut state), TickResult::GameOver);
    assert!(state.game_over());
    assert!(state.piece().is_none());

    // The landed piece was merged before the failed respawn, and no
    // overlapping active bitmap persists.
    assert_eq!(state.locked_pieces(), 1);
    assert_eq!(state.board().committed_rows()[6], 0x18);
    assert_eq!(state.board().committed_rows()[7], 0x18);
    assert!(!state.board().is_overlapping());
    assert!(!state.board().is_saturated());
}

#[test]
fn test_game_over_is_latched() {
    let mut state = GameState::new(1);
    for idx in 0..MATRIX_ROWS {
        state.board_mut().set_committed_row(idx, FULL_ROW);
    }
    assert_eq!(state.tick(), TickResult::GameOver);

    let score = state.score();
    let frame = state.frame();

    // Ticks and commands after game over change nothing.
    assert_eq!(state.tick(), TickResult::GameOver);
    assert!(!state.apply(Command::MoveLeft));
    assert!(!state.apply(Command::RotateCw));
    assert_eq!(state.score(), score);
    assert_eq!(state.frame(), frame);
}

#[test]
fn test_reset_starts_a_fresh_session() {
    let mut state = GameState::new(1);
    for idx in 0..MATRIX_ROWS {
        state.board_mut().set_committed_row(idx, FULL_ROW);
    }
    assert_eq!(state.tick(), TickResult::GameOver);

    state.reset();

    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.locked_pieces(), 0);
    assert_eq!(state.drop_interval_ms(), DEFAULT_DROP_MS);
    assert_eq!(frame_cells(&state), 4);
}

#[test]
fn test_random_sessions_terminate_with_monotonic_score() {
    for seed in 1..=10 {
        let mut state = GameState::new(seed);
        let mut last_score = 0;

        let mut ticks = 0u32;
        while !state.game_over() {
            state.tick();
            assert!(state.score() >= last_score, "seed {seed}: score decreased");
            last_score = state.score();

            ticks += 1;
            assert!(ticks < 100_000, "seed {seed}: session never ended");
        }

        assert!(state.locked_pieces() > 0, "seed {seed}");
    }
}
