//! Rule properties of the ataxx board, checked over seeded random games.

use strictly_ataxx::{
    BOARD_SIZE, Board, Cell, Color, Grid, JumpRule, MoveKind, Position, RandomAgent,
};

/// Plays up to `plies` random moves, calling `check` before and after each.
fn play_random<F>(seed: u64, jump_rule: JumpRule, plies: usize, mut check: F)
where
    F: FnMut(&Board, &Board, Position, Position, MoveKind),
{
    let mut board = Board::with_jump_rule(jump_rule);
    let mut white = RandomAgent::with_seed("w", Color::White, seed);
    let mut black = RandomAgent::with_seed("b", Color::Black, seed.wrapping_add(1));

    for _ in 0..plies {
        if board.is_complete() {
            break;
        }
        let agent = match board.current_turn() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Ok((start, target)) = agent.choose(&board) else {
            board.switch_turn();
            continue;
        };
        let before = board.clone();
        let kind = board.make_move(start, target).expect("agent moves are legal");
        check(&before, &board, start, target, kind);
        board.switch_turn();
    }
}

/// The same position with every piece recolored and the turn flipped.
fn color_swapped(board: &Board) -> Board {
    let mut grid = Grid::empty();
    for (pos, cell) in board.grid().iter() {
        let swapped = match cell {
            Cell::Empty => Cell::Empty,
            Cell::Occupied(color) => Cell::Occupied(color.opponent()),
        };
        grid.set(pos, swapped).unwrap();
    }
    Board::from_grid(grid, board.current_turn().opponent(), board.jump_rule())
}

#[test]
fn test_possible_moves_empty_for_unowned_positions() {
    play_random(3, JumpRule::Orthogonal, 30, |_, after, _, _, _| {
        for pos in Position::all() {
            if after.get(pos) != Some(Cell::Occupied(after.current_turn())) {
                assert!(after.possible_moves(pos).is_empty(), "{pos} should have no moves");
            }
        }
    });
}

#[test]
fn test_validity_symmetric_under_color_swap() {
    for jump_rule in [JumpRule::Orthogonal, JumpRule::Extended] {
        play_random(11, jump_rule, 20, |_, after, _, _, _| {
            let swapped = color_swapped(after);
            for start in Position::all() {
                for target in Position::all() {
                    assert_eq!(
                        after.is_move_valid(start, target),
                        swapped.is_move_valid(start, target),
                        "{start} -> {target}"
                    );
                }
            }
        });
    }
}

#[test]
fn test_scores_account_for_placement_and_conversion() {
    for seed in 0..5 {
        play_random(seed, JumpRule::Extended, 200, |before, after, _, _, kind| {
            let mover = before.current_turn();
            let opponent = mover.opponent();
            let converted = before.scores().of(opponent) - after.scores().of(opponent);

            match kind {
                MoveKind::Copy => {
                    assert_eq!(after.scores().total(), before.scores().total() + 1);
                    assert_eq!(
                        after.scores().of(mover),
                        before.scores().of(mover) + converted + 1
                    );
                }
                MoveKind::Jump => {
                    assert_eq!(after.scores().total(), before.scores().total());
                    assert_eq!(
                        after.scores().of(mover),
                        before.scores().of(mover) + converted
                    );
                }
                MoveKind::Invalid => panic!("applied move reported Invalid"),
            }
        });
    }
}

#[test]
fn test_copy_and_jump_effects_on_origin_and_target() {
    play_random(21, JumpRule::Orthogonal, 100, |before, after, start, target, kind| {
        let mover = Cell::Occupied(before.current_turn());
        assert_eq!(after.get(target), Some(mover));
        match kind {
            MoveKind::Copy => assert_eq!(after.get(start), Some(mover)),
            MoveKind::Jump => assert_eq!(after.get(start), Some(Cell::Empty)),
            MoveKind::Invalid => unreachable!(),
        }
    });
}

#[test]
fn test_only_cells_next_to_target_change_owner() {
    play_random(5, JumpRule::Extended, 120, |before, after, start, target, _| {
        for pos in Position::all() {
            if pos == start || pos == target {
                continue;
            }
            let (dr, dc) = pos.distance(target);
            if dr > 1 || dc > 1 {
                assert_eq!(before.get(pos), after.get(pos), "{pos} changed");
            }
        }
    });
}

#[test]
fn test_is_complete_matches_scan() {
    let mut board = Board::empty(Color::White, JumpRule::Orthogonal);
    for (i, pos) in Position::all().enumerate() {
        assert!(!board.is_complete());
        let color = if i % 2 == 0 { Color::White } else { Color::Black };
        board.set(pos, Cell::Occupied(color)).unwrap();
    }
    assert!(board.is_complete());
    assert_eq!(board.scores().total(), BOARD_SIZE * BOARD_SIZE);

    board.set(Position::new(3, 3), Cell::Empty).unwrap();
    assert!(!board.is_complete());
}

#[test]
fn test_positions_of_is_row_major() {
    let mut board = Board::new();
    board.set(Position::new(2, 5), Cell::Occupied(Color::White)).unwrap();
    board.set(Position::new(2, 1), Cell::Occupied(Color::White)).unwrap();
    assert_eq!(
        board.positions_of(Color::White),
        vec![Position::new(2, 1), Position::new(2, 5), Position::new(6, 3)]
    );
    assert_eq!(board.positions_of(Color::Black), vec![Position::new(0, 3)]);
}

#[test]
fn test_scenario_from_initial_position() {
    let board = Board::new();
    assert_eq!(
        board.is_move_valid(Position::new(6, 3), Position::new(5, 3)),
        MoveKind::Copy
    );
    assert_eq!(
        board.is_move_valid(Position::new(6, 3), Position::new(4, 3)),
        MoveKind::Jump
    );
}
