use super::*;
use engine_core::board_game::{FIRST_PLAYER, SECOND_PLAYER};
use engine_core::{Batch, Simulator, SimulatorError, StateBatch, StepOutput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const STATE_LEN: usize = BOARD_SIZE + 1;

fn sim() -> ConnectFour {
    ConnectFour::new(EngineOptions::sequential())
}

fn state(board: &[Cell], marker: Cell) -> StateBatch {
    let mut row = board.to_vec();
    row.push(marker);
    Batch::new(STATE_LEN, row).unwrap()
}

/// Play `columns` in order on a single game, returning every step output
fn play(sim: &ConnectFour, columns: &[usize]) -> Vec<StepOutput> {
    let mut states = sim.reset_bulk(1).unwrap().states;
    columns
        .iter()
        .map(|&col| {
            let step = sim.step_bulk(&states, &[col]).unwrap();
            states = step.states.clone();
            step
        })
        .collect()
}

/// Asserts the last move of `columns` wins and nothing before it ends the game
fn assert_wins_on_last_move(columns: &[usize]) {
    let sim = sim();
    let steps = play(&sim, columns);
    let (last, before) = steps.split_last().unwrap();

    for step in before {
        assert_eq!(step.terminals, vec![false], "sequence {:?}", columns);
        assert_eq!(step.rewards, vec![0.0]);
    }
    assert_eq!(last.terminals, vec![true], "sequence {:?}", columns);
    assert_eq!(last.rewards, vec![1.0]);
    assert_eq!(&last.masks[0], &[false; COLS]);
    assert_eq!(sim.check_loss(&last.states).unwrap(), vec![true]);
}

#[test]
fn test_initial_state() {
    let reset = sim().reset_bulk(3).unwrap();
    for state in reset.states.rows() {
        assert_eq!(&state[..BOARD_SIZE], &[0; BOARD_SIZE]);
        assert_eq!(state[BOARD_SIZE], FIRST_PLAYER);
    }
    assert_eq!(reset.masks.width(), COLS);
    assert!(reset.masks.as_slice().iter().all(|&legal| legal));
}

#[test]
fn test_drop_piece() {
    let steps = play(&sim(), &[3]);
    let state = &steps[0].states[0];

    assert_eq!(state[pos(3, 0)], FIRST_PLAYER);
    assert_eq!(column_height(&state[..BOARD_SIZE], 3), 1);
    assert_eq!(state[BOARD_SIZE], SECOND_PLAYER);
    assert_eq!(steps[0].terminals, vec![false]);
}

#[test]
fn test_stacking_pieces() {
    let sim = sim();
    let steps = play(&sim, &[0; ROWS]);

    for (i, step) in steps.iter().enumerate() {
        let expected = if i % 2 == 0 { FIRST_PLAYER } else { SECOND_PLAYER };
        assert_eq!(step.states[0][pos(0, i)], expected);
        assert_eq!(column_height(&step.states[0][..BOARD_SIZE], 0), i + 1);
    }

    // Column 0 is now full
    let last = steps.last().unwrap();
    assert!(!last.masks[0][0]);
    assert!(last.masks[0][1..].iter().all(|&legal| legal));
}

#[test]
fn test_full_column_is_illegal() {
    let sim = sim();
    let steps = play(&sim, &[0; ROWS]);
    let states = &steps.last().unwrap().states;
    let before = states.clone();

    assert_eq!(
        sim.step_bulk(states, &[0]),
        Err(SimulatorError::IllegalAction {
            index: 0,
            action: 0
        })
    );
    assert_eq!(states, &before);
}

#[test]
fn test_out_of_range_column() {
    let sim = sim();
    let reset = sim.reset_bulk(1).unwrap();
    assert_eq!(
        sim.step_bulk(&reset.states, &[COLS]),
        Err(SimulatorError::ActionOutOfRange {
            index: 0,
            action: COLS,
            num_actions: COLS
        })
    );
}

#[test]
fn test_horizontal_win() {
    // X fills the bottom row 0..4, O stacks on top
    assert_wins_on_last_move(&[0, 0, 1, 1, 2, 2, 3]);
}

#[test]
fn test_vertical_win() {
    assert_wins_on_last_move(&[0, 1, 0, 1, 0, 1, 0]);
}

#[test]
fn test_diagonal_win_ascending() {
    // X at (0,0), (1,1), (2,2), (3,3)
    assert_wins_on_last_move(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
}

#[test]
fn test_diagonal_win_descending() {
    // X at (3,0), (2,1), (1,2), (0,3)
    assert_wins_on_last_move(&[3, 2, 2, 1, 1, 0, 1, 0, 0, 4, 0]);
}

#[test]
fn test_second_player_wins() {
    let sim = sim();
    let steps = play(&sim, &[0, 1, 0, 1, 0, 1, 6, 1]);
    let last = steps.last().unwrap();

    assert_eq!(last.rewards, vec![1.0]);
    assert_eq!(last.terminals, vec![true]);
    assert_eq!(last.states[0][BOARD_SIZE], FIRST_PLAYER);
    assert_eq!(last.states[0][pos(1, 3)], SECOND_PLAYER);
}

#[test]
fn test_three_in_a_row_is_not_a_win() {
    let mut board = [0; BOARD_SIZE];
    for col in 0..3 {
        board[pos(col, 0)] = FIRST_PLAYER;
    }
    for row in 0..3 {
        board[pos(6, row)] = SECOND_PLAYER;
    }

    assert!(!Rules::has_line(&board, FIRST_PLAYER));
    assert!(!Rules::has_line(&board, SECOND_PLAYER));
}

#[test]
fn test_line_does_not_wrap_across_rows() {
    // Cells 5, 6, 7, 8 are consecutive indices but span two rows
    let mut board = [0; BOARD_SIZE];
    for idx in 5..9 {
        board[idx] = FIRST_PLAYER;
    }
    assert!(!Rules::has_line(&board, FIRST_PLAYER));
}

#[test]
fn test_draw_board() {
    // Columns alternate R R Y Y R R / Y Y R R Y Y
    let pattern = [
        [1, 1, -1, -1, 1, 1],
        [-1, -1, 1, 1, -1, -1],
    ];
    let mut board = [0; BOARD_SIZE];
    for col in 0..COLS {
        for row in 0..ROWS {
            board[pos(col, row)] = pattern[col % 2][row];
        }
    }

    let sim = sim();
    let batch = state(&board, FIRST_PLAYER);
    assert_eq!(sim.check_win(&batch).unwrap(), vec![false]);
    assert_eq!(sim.check_loss(&batch).unwrap(), vec![false]);
    assert_eq!(sim.check_terminal(&batch).unwrap(), vec![true]);
    assert_eq!(sim.legal_masks(&batch).unwrap().as_slice(), &[false; COLS]);
    assert_eq!(
        sim.step_bulk(&batch, &[0]),
        Err(SimulatorError::TerminalState { index: 0 })
    );
}

#[test]
fn test_full_game_ends_in_draw() {
    let columns = [
        4, 3, 6, 0, 1, 4, 5, 5, 1, 1, 5, 0, 1, 6, 0, 1, 5, 5, 1, 0, 4, 6, 3, 2, 6, 6, 0, 4, 6, 5,
        2, 0, 4, 2, 4, 2, 2, 2, 3, 3, 3, 3,
    ];
    let sim = sim();
    let steps = play(&sim, &columns);
    let (last, before) = steps.split_last().unwrap();

    assert!(before.iter().all(|step| step.terminals == vec![false]));
    assert_eq!(last.terminals, vec![true]);
    assert_eq!(last.rewards, vec![0.0]);
    assert!(last.states[0][..BOARD_SIZE].iter().all(|&cell| cell != 0));
}

#[test]
fn test_random_games_keep_gravity() {
    let sim = sim();
    let space = sim.action_space();
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for _ in 0..20 {
        let reset = sim.reset_bulk(1).unwrap();
        let (mut states, mut masks) = (reset.states, reset.masks);
        for ply in 0..BOARD_SIZE {
            let legal = space.legal_actions(&masks[0]);
            if legal.is_empty() {
                break;
            }
            let col = legal[rng.gen_range(0..legal.len())];
            let height = column_height(&states[0][..BOARD_SIZE], col);

            let step = sim.step_bulk(&states, &[col]).unwrap();
            let board = &step.states[0][..BOARD_SIZE];
            assert_eq!(board[pos(col, height)], states[0][BOARD_SIZE]);
            assert_eq!(board.iter().filter(|&&cell| cell != 0).count(), ply + 1);

            // No disc floats above an empty cell
            for c in 0..COLS {
                let h = column_height(board, c);
                assert!((h..ROWS).all(|row| board[pos(c, row)] == 0));
            }

            if step.terminals[0] {
                break;
            }
            states = step.states;
            masks = step.masks;
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = sim();
    let parallel = ConnectFour::new(EngineOptions::default().with_parallel_threshold(1));
    let mut rng = ChaCha20Rng::seed_from_u64(99);

    let mut states = sequential.reset_bulk(64).unwrap().states;
    for _ in 0..4 {
        let actions: Vec<usize> = (0..64).map(|_| rng.gen_range(0..COLS)).collect();
        let a = sequential.step_bulk(&states, &actions).unwrap();
        let b = parallel.step_bulk(&states, &actions).unwrap();
        assert_eq!(a, b);
        states = a.states;
    }
}

#[test]
fn test_render() {
    let sim = sim();
    let steps = play(&sim, &[3]);
    let text = sim.render(&steps[0].states[0]).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), ROWS + 2);
    assert_eq!(lines[0], ". . . . . . .");
    assert_eq!(lines[ROWS - 1], ". . . X . . .");
    assert_eq!(lines[ROWS], "0 1 2 3 4 5 6");
    assert_eq!(lines[ROWS + 1], "To move: O");
}

#[test]
fn test_action_space() {
    let space = sim().action_space();
    assert_eq!(space.env_id, "connect4");
    assert_eq!(space.num_actions, COLS);
    assert_eq!(space.board_type, BoardType::DropColumn);
    assert_eq!(space.state_len(), STATE_LEN);
}

#[test]
fn test_factory() {
    let sim = factory(EngineOptions::sequential()).create();
    assert_eq!(sim.env_id(), "connect4");
    assert_eq!(sim.options(), EngineOptions::sequential());
}
