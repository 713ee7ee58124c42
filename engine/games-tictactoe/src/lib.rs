//! TicTacToe rules for the batched simulator engine
//!
//! The board is 3x3, flattened row-major; each action places the current
//! player's mark on the cell with the same index. A state is the nine cells
//! followed by the current-player marker (10 values).
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{EngineOptions, Simulator};
//! use games_tictactoe::TicTacToe;
//!
//! let sim = TicTacToe::new(EngineOptions::default());
//! let reset = sim.reset_bulk(4).unwrap();
//! let step = sim.step_bulk(&reset.states, &[0, 4, 8, 2]).unwrap();
//! assert_eq!(step.rewards, vec![0.0; 4]);
//! ```

use engine_core::board_game::{cell_symbol, line_complete, Cell, EMPTY};
use engine_core::{BatchAdapter, BoardRules, EngineOptions, Factory};

/// Winning positions (rows, columns, diagonals)
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe board rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules;

impl BoardRules for Rules {
    const ENV_ID: &'static str = "tictactoe";
    const DISPLAY_NAME: &'static str = "Tic-Tac-Toe";
    const ROWS: usize = 3;
    const COLS: usize = 3;
    const NUM_ACTIONS: usize = 9;

    fn landing_cell(board: &[Cell], action: usize) -> Option<usize> {
        (board[action] == EMPTY).then_some(action)
    }

    fn has_line(board: &[Cell], player: Cell) -> bool {
        LINES.iter().any(|line| line_complete(board, line, player))
    }

    fn render_board(board: &[Cell], symbols: [char; 2], out: &mut String) {
        for (row, cells) in board.chunks(Self::COLS).enumerate() {
            if row > 0 {
                out.push_str("---+---+---\n");
            }
            let line: Vec<String> = cells
                .iter()
                .map(|&cell| format!(" {} ", cell_symbol(cell, symbols)))
                .collect();
            out.push_str(&line.join("|"));
            out.push('\n');
        }
    }
}

/// Batched TicTacToe simulator
pub type TicTacToe = BatchAdapter<Rules>;

/// Factory spawning independent TicTacToe simulators built with `options`
pub fn factory(options: EngineOptions) -> Factory<TicTacToe> {
    Factory::new(TicTacToe::new, options)
}
