//! Shared pieces for two-player, zero-sum board games.
//!
//! A state is a flat vector of [`Cell`] values: every board cell followed by
//! the marker of the player to move. The first player is `+1`, the second
//! `-1`, and empty cells are `0`.

/// Value of a single board cell or of the current-player marker
pub type Cell = i8;

pub const EMPTY: Cell = 0;
/// Marker of the player who moves first after a reset
pub const FIRST_PLAYER: Cell = 1;
pub const SECOND_PLAYER: Cell = -1;

/// The other player's marker
#[inline]
pub fn opponent(player: Cell) -> Cell {
    -player
}

#[inline]
pub fn is_player(value: Cell) -> bool {
    value == FIRST_PLAYER || value == SECOND_PLAYER
}

#[inline]
pub fn is_cell_value(value: Cell) -> bool {
    value == EMPTY || is_player(value)
}

/// Calculate the reward for the player who just moved.
///
/// # Returns
/// * `1.0` if the move completed a line for the mover
/// * `-1.0` if the opponent holds a complete line
/// * `0.0` for draws and ongoing games
///
/// # Example
/// ```
/// use engine_core::board_game::calculate_reward;
///
/// assert_eq!(calculate_reward(true, false), 1.0);
/// assert_eq!(calculate_reward(false, true), -1.0);
/// assert_eq!(calculate_reward(false, false), 0.0);
/// ```
#[inline]
pub fn calculate_reward(win: bool, loss: bool) -> f32 {
    if loss {
        -1.0
    } else if win {
        1.0
    } else {
        0.0
    }
}

/// Whether every cell of `line` holds `player`
#[inline]
pub fn line_complete(board: &[Cell], line: &[usize], player: Cell) -> bool {
    line.iter().all(|&idx| board[idx] == player)
}

/// Render symbol for a cell: `symbols[0]` for the first player,
/// `symbols[1]` for the second, `.` for empty.
#[inline]
pub fn cell_symbol(cell: Cell, symbols: [char; 2]) -> char {
    match cell {
        FIRST_PLAYER => symbols[0],
        SECOND_PLAYER => symbols[1],
        _ => '.',
    }
}
