//! Connect 4 rules for the batched simulator engine
//!
//! Connect 4 is a two-player connection game where players drop discs into a
//! 7-column, 6-row vertically suspended grid. The objective is to be the
//! first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! An action is a column index; the disc lands on the lowest empty cell.
//! A state is the 42 cells followed by the current-player marker.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{EngineOptions, Simulator};
//! use games_connect4::ConnectFour;
//!
//! let sim = ConnectFour::new(EngineOptions::default());
//! let reset = sim.reset_bulk(2).unwrap();
//! let step = sim.step_bulk(&reset.states, &[3, 3]).unwrap();
//! assert_eq!(step.states[0][3], 1);
//! ```

use engine_core::board_game::{cell_symbol, Cell, EMPTY};
use engine_core::{BatchAdapter, BoardRules, BoardType, EngineOptions, Factory};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Discs in a row needed to win
pub const CONNECT: usize = 4;

/// Direction vectors: horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Convert column and row to board index
#[inline]
pub fn pos(col: usize, row: usize) -> usize {
    row * COLS + col
}

/// Number of discs already in `col`
pub fn column_height(board: &[Cell], col: usize) -> usize {
    (0..ROWS)
        .take_while(|&row| board[pos(col, row)] != EMPTY)
        .count()
}

/// Length of the run of `player` discs starting at (col, row), capped at
/// `CONNECT`
fn run_length(
    board: &[Cell],
    col: usize,
    row: usize,
    (dc, dr): (i32, i32),
    player: Cell,
) -> usize {
    let (mut c, mut r) = (col as i32, row as i32);
    let mut count = 0;
    while count < CONNECT && c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
        if board[pos(c as usize, r as usize)] != player {
            break;
        }
        count += 1;
        c += dc;
        r += dr;
    }
    count
}

/// Connect 4 board rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules;

impl BoardRules for Rules {
    const ENV_ID: &'static str = "connect4";
    const DISPLAY_NAME: &'static str = "Connect 4";
    const ROWS: usize = ROWS;
    const COLS: usize = COLS;
    const NUM_ACTIONS: usize = COLS;
    const BOARD_TYPE: BoardType = BoardType::DropColumn;

    fn landing_cell(board: &[Cell], action: usize) -> Option<usize> {
        let row = column_height(board, action);
        (row < ROWS).then(|| pos(action, row))
    }

    fn has_line(board: &[Cell], player: Cell) -> bool {
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| {
                board[pos(col, row)] == player
                    && DIRECTIONS
                        .iter()
                        .any(|&dir| run_length(board, col, row, dir, player) >= CONNECT)
            })
        })
    }

    fn render_board(board: &[Cell], symbols: [char; 2], out: &mut String) {
        for row in (0..ROWS).rev() {
            let line: Vec<String> = (0..COLS)
                .map(|col| cell_symbol(board[pos(col, row)], symbols).to_string())
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        let footer: Vec<String> = (0..COLS).map(|col| col.to_string()).collect();
        out.push_str(&footer.join(" "));
        out.push('\n');
    }
}

/// Batched Connect 4 simulator
pub type ConnectFour = BatchAdapter<Rules>;

/// Factory spawning independent Connect 4 simulators built with `options`
pub fn factory(options: EngineOptions) -> Factory<ConnectFour> {
    Factory::new(ConnectFour::new, options)
}

#[cfg(test)]
mod tests;
