//! Action space descriptors
//!
//! Policy networks and search code size their outputs and read legality
//! masks from these descriptors instead of hard-coding per-game constants.

use serde::{Deserialize, Serialize};

/// How an action index maps onto the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardType {
    /// Action `i` places a mark directly on cell `i` (TicTacToe)
    Grid,
    /// Action `i` drops a mark into column `i` (Connect 4)
    DropColumn,
}

/// Discrete action space and state/mask shapes of a game variant
///
/// Pure data: one value per variant, identical for every instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    /// Environment identifier (e.g., "tictactoe", "connect4")
    pub env_id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe", "Connect 4")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Number of discrete actions, which is also the legality mask length
    pub num_actions: usize,

    pub board_type: BoardType,
}

impl ActionSpace {
    /// Create a new descriptor with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            num_actions: 0,
            board_type: BoardType::Grid,
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for action count
    pub fn with_actions(mut self, num_actions: usize) -> Self {
        self.num_actions = num_actions;
        self
    }

    pub fn with_board_type(mut self, board_type: BoardType) -> Self {
        self.board_type = board_type;
        self
    }

    /// Total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Length of one state vector: every cell plus the current-player marker
    pub fn state_len(&self) -> usize {
        self.board_size() + 1
    }

    /// Shape of a single state
    pub fn state_shape(&self) -> [usize; 1] {
        [self.state_len()]
    }

    /// Shape of a single legality mask
    pub fn mask_shape(&self) -> [usize; 1] {
        [self.num_actions]
    }

    /// Whether `action` indexes into this action space
    pub fn contains(&self, action: usize) -> bool {
        action < self.num_actions
    }

    /// Indices of the legal actions in `mask`
    ///
    /// Entries past `num_actions` are ignored.
    pub fn legal_actions(&self, mask: &[bool]) -> Vec<usize> {
        mask.iter()
            .take(self.num_actions)
            .enumerate()
            .filter_map(|(action, &legal)| legal.then_some(action))
            .collect()
    }
}
