//! Typed rules trait for board game implementations
//!
//! Game crates describe the rules of a single board through [`BoardRules`].
//! The batched, validated contract is then provided once for every game by
//! [`BatchAdapter`](crate::adapter::BatchAdapter).

use crate::action_space::{ActionSpace, BoardType};
use crate::board_game::Cell;

/// Per-board rules of a two-player, zero-sum game with a discrete action space
///
/// All functions are pure and receive the board cells only (no marker). The
/// board slice is always exactly `CELLS` long and every value is one of
/// `-1`, `0`, `+1`.
///
/// # Example
///
/// ```rust
/// use engine_core::board_game::{Cell, EMPTY};
/// use engine_core::typed::BoardRules;
///
/// /// Three cells in a row; filling all of them wins.
/// #[derive(Debug)]
/// struct Strip;
///
/// impl BoardRules for Strip {
///     const ENV_ID: &'static str = "strip";
///     const DISPLAY_NAME: &'static str = "Strip";
///     const ROWS: usize = 1;
///     const COLS: usize = 3;
///     const NUM_ACTIONS: usize = 3;
///
///     fn landing_cell(board: &[Cell], action: usize) -> Option<usize> {
///         (board[action] == EMPTY).then_some(action)
///     }
///
///     fn has_line(board: &[Cell], player: Cell) -> bool {
///         board.iter().all(|&cell| cell == player)
///     }
///
///     fn render_board(board: &[Cell], _symbols: [char; 2], out: &mut String) {
///         out.push_str(&format!("{:?}", board));
///     }
/// }
///
/// assert_eq!(Strip::CELLS, 3);
/// assert_eq!(Strip::action_space().num_actions, 3);
/// ```
pub trait BoardRules: Send + Sync + std::fmt::Debug + 'static {
    /// Environment identifier (e.g., "tictactoe")
    const ENV_ID: &'static str;

    const DISPLAY_NAME: &'static str;

    /// Board height in cells
    const ROWS: usize;

    /// Board width in cells
    const COLS: usize;

    /// Number of board cells in a state, excluding the marker
    const CELLS: usize = Self::ROWS * Self::COLS;

    /// Size of the discrete action space
    const NUM_ACTIONS: usize;

    const BOARD_TYPE: BoardType = BoardType::Grid;

    /// Cell the mover's mark lands on when playing `action`.
    ///
    /// Returns `None` when the action is not playable (occupied cell or full
    /// column). `action` is always below `NUM_ACTIONS`.
    fn landing_cell(board: &[Cell], action: usize) -> Option<usize>;

    /// Whether `player` holds a winning configuration on `board`
    fn has_line(board: &[Cell], player: Cell) -> bool;

    /// Append a human-readable drawing of `board` to `out`
    ///
    /// `symbols` holds the glyphs of the first and second player.
    fn render_board(board: &[Cell], symbols: [char; 2], out: &mut String);

    /// Descriptor for this game's action space
    fn action_space() -> ActionSpace {
        ActionSpace::new(Self::ENV_ID, Self::DISPLAY_NAME)
            .with_board(Self::COLS, Self::ROWS)
            .with_actions(Self::NUM_ACTIONS)
            .with_board_type(Self::BOARD_TYPE)
    }
}
