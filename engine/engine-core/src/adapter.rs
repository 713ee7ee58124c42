//! Adapter layer turning per-board rules into the batched simulator contract
//!
//! `BatchAdapter` wraps any [`BoardRules`] implementation and provides the
//! [`Simulator`] interface: batch validation, move application, reward and
//! terminal assignment, turn alternation, and legality masks. Games only
//! describe where a mark lands and what counts as a line.

use std::fmt;
use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::action_space::ActionSpace;
use crate::batch::{Batch, MaskBatch, ResetOutput, StateBatch, StepInfo, StepOutput};
use crate::board_game::{
    calculate_reward, cell_symbol, is_cell_value, is_player, opponent, Cell, EMPTY, FIRST_PLAYER,
};
use crate::error::SimulatorError;
use crate::simulator::Simulator;
use crate::typed::BoardRules;

/// Default batch size from which moves are applied in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Constructor arguments shared by every game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Batches with at least this many states apply moves on the rayon
    /// thread pool. `0` keeps every batch on the calling thread.
    pub parallel_threshold: usize,
    /// Render glyphs for the first and second player
    pub symbols: [char; 2],
}

impl EngineOptions {
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_symbols(mut self, symbols: [char; 2]) -> Self {
        self.symbols = symbols;
        self
    }

    /// Options that never leave the calling thread
    pub fn sequential() -> Self {
        Self::default().with_parallel_threshold(0)
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            symbols: ['X', 'O'],
        }
    }
}

/// Batched simulator over the rules `R`
///
/// Holds only its construction options; all game data lives in the batches
/// passed to each call.
///
/// # Example
///
/// ```rust
/// # use engine_core::adapter::{BatchAdapter, EngineOptions};
/// # use engine_core::board_game::{Cell, EMPTY};
/// # use engine_core::simulator::Simulator;
/// # use engine_core::typed::BoardRules;
/// #
/// # #[derive(Debug)]
/// # struct Strip;
/// # impl BoardRules for Strip {
/// #     const ENV_ID: &'static str = "strip";
/// #     const DISPLAY_NAME: &'static str = "Strip";
/// #     const ROWS: usize = 1;
/// #     const COLS: usize = 3;
/// #     const NUM_ACTIONS: usize = 3;
/// #     fn landing_cell(board: &[Cell], action: usize) -> Option<usize> {
/// #         (board[action] == EMPTY).then_some(action)
/// #     }
/// #     fn has_line(board: &[Cell], player: Cell) -> bool {
/// #         board.iter().all(|&cell| cell == player)
/// #     }
/// #     fn render_board(_board: &[Cell], _symbols: [char; 2], _out: &mut String) {}
/// # }
/// let sim: Box<dyn Simulator> = Box::new(BatchAdapter::<Strip>::new(EngineOptions::default()));
///
/// let reset = sim.reset_bulk(2).unwrap();
/// let step = sim.step_bulk(&reset.states, &[0, 2]).unwrap();
/// assert_eq!(&step.states[0], &[1, 0, 0, -1]);
/// assert_eq!(&step.states[1], &[0, 0, 1, -1]);
/// ```
pub struct BatchAdapter<R: BoardRules> {
    options: EngineOptions,
    _rules: PhantomData<fn() -> R>,
}

impl<R: BoardRules> BatchAdapter<R> {
    /// Values per state: every cell plus the current-player marker
    pub const STATE_LEN: usize = R::CELLS + 1;

    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            _rules: PhantomData,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Check the batch width and that every cell and marker holds a legal value.
    fn validate(states: &StateBatch) -> Result<(), SimulatorError> {
        if states.width() != Self::STATE_LEN {
            return Err(SimulatorError::StateWidth {
                expected: Self::STATE_LEN,
                actual: states.width(),
            });
        }
        for (index, state) in states.rows().enumerate() {
            Self::validate_state(index, state)?;
        }
        Ok(())
    }

    fn validate_state(index: usize, state: &[Cell]) -> Result<(), SimulatorError> {
        let (board, marker) = state.split_at(R::CELLS);
        if let Some(cell) = board.iter().position(|&value| !is_cell_value(value)) {
            return Err(SimulatorError::MalformedState {
                index,
                reason: format!("cell {} holds {}", cell, board[cell]),
            });
        }
        if !is_player(marker[0]) {
            return Err(SimulatorError::MalformedState {
                index,
                reason: format!("current player marker is {}", marker[0]),
            });
        }
        Ok(())
    }

    /// Fill `mask` with per-action legality and report whether any action is legal.
    fn fill_mask(board: &[Cell], mask: &mut [bool]) -> bool {
        let mut any = false;
        for (action, slot) in mask.iter_mut().enumerate() {
            *slot = R::landing_cell(board, action).is_some();
            any |= *slot;
        }
        any
    }

    fn has_legal_action(board: &[Cell]) -> bool {
        (0..R::NUM_ACTIONS).any(|action| R::landing_cell(board, action).is_some())
    }

    fn is_terminal(board: &[Cell], player: Cell) -> bool {
        R::has_line(board, player)
            || R::has_line(board, opponent(player))
            || !Self::has_legal_action(board)
    }

    /// Evaluate `R::has_line` for each state against the marker, or its
    /// negation when `flip` is set.
    fn scan_lines(states: &StateBatch, flip: bool) -> Result<Vec<bool>, SimulatorError> {
        Self::validate(states)?;
        Ok(states
            .rows()
            .map(|state| {
                let player = state[R::CELLS];
                let player = if flip { opponent(player) } else { player };
                R::has_line(&state[..R::CELLS], player)
            })
            .collect())
    }

    /// Resolve the landing cell of every action, failing on the first bad one.
    ///
    /// Terminal states are rejected across the whole batch before any action
    /// is looked at.
    fn resolve_targets(
        states: &StateBatch,
        actions: &[usize],
    ) -> Result<Vec<usize>, SimulatorError> {
        if states.is_empty() {
            return Err(SimulatorError::EmptyBatch);
        }
        if actions.len() != states.len() {
            return Err(SimulatorError::ActionCountMismatch {
                expected: states.len(),
                actual: actions.len(),
            });
        }
        Self::validate(states)?;

        for (index, state) in states.rows().enumerate() {
            if Self::is_terminal(&state[..R::CELLS], state[R::CELLS]) {
                return Err(SimulatorError::TerminalState { index });
            }
        }

        states
            .rows()
            .zip(actions)
            .enumerate()
            .map(|(index, (state, &action))| {
                if action >= R::NUM_ACTIONS {
                    return Err(SimulatorError::ActionOutOfRange {
                        index,
                        action,
                        num_actions: R::NUM_ACTIONS,
                    });
                }
                R::landing_cell(&state[..R::CELLS], action)
                    .ok_or(SimulatorError::IllegalAction { index, action })
            })
            .collect()
    }

    /// Place the mover's mark at `target`, then score, mask, and flip the turn.
    ///
    /// Returns `(reward, terminal)` for the player who moved.
    fn apply(state: &mut [Cell], mask: &mut [bool], target: usize) -> (f32, bool) {
        let player = state[R::CELLS];
        let board = &mut state[..R::CELLS];
        board[target] = player;

        let win = R::has_line(board, player);
        let loss = R::has_line(board, opponent(player));
        let any_legal = Self::fill_mask(board, mask);
        let terminal = win || loss || !any_legal;
        if terminal {
            mask.fill(false);
        }

        state[R::CELLS] = opponent(player);
        (calculate_reward(win, loss), terminal)
    }
}

impl<R: BoardRules> Default for BatchAdapter<R> {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl<R: BoardRules> Clone for BatchAdapter<R> {
    fn clone(&self) -> Self {
        Self::new(self.options)
    }
}

impl<R: BoardRules> fmt::Debug for BatchAdapter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchAdapter")
            .field("env_id", &R::ENV_ID)
            .field("options", &self.options)
            .finish()
    }
}

impl<R: BoardRules> Simulator for BatchAdapter<R> {
    fn env_id(&self) -> &'static str {
        R::ENV_ID
    }

    fn action_space(&self) -> ActionSpace {
        R::action_space()
    }

    fn reset_bulk(&self, n: usize) -> Result<ResetOutput, SimulatorError> {
        if n == 0 {
            return Err(SimulatorError::EmptyBatch);
        }
        debug!(env_id = R::ENV_ID, batch = n, "reset_bulk");

        let mut initial = vec![EMPTY; Self::STATE_LEN];
        initial[R::CELLS] = FIRST_PLAYER;
        let mut data = Vec::with_capacity(n * Self::STATE_LEN);
        for _ in 0..n {
            data.extend_from_slice(&initial);
        }

        Ok(ResetOutput {
            states: Batch::new(Self::STATE_LEN, data)?,
            masks: Batch::filled(n, R::NUM_ACTIONS, true),
        })
    }

    fn step_bulk(
        &self,
        states: &StateBatch,
        actions: &[usize],
    ) -> Result<StepOutput, SimulatorError> {
        let targets = Self::resolve_targets(states, actions).map_err(|err| {
            warn!(env_id = R::ENV_ID, error = %err, "Rejected step_bulk");
            err
        })?;

        let n = states.len();
        let width = Self::STATE_LEN;
        let num_actions = R::NUM_ACTIONS;
        let mut next_states = states.clone();
        let mut masks = Batch::filled(n, num_actions, false);

        let parallel = self.options.parallel_threshold > 0 && n >= self.options.parallel_threshold;
        debug!(env_id = R::ENV_ID, batch = n, parallel, "step_bulk");

        let outcomes: Vec<(f32, bool)> = if parallel {
            next_states
                .as_mut_slice()
                .par_chunks_mut(width)
                .zip(masks.as_mut_slice().par_chunks_mut(num_actions))
                .zip(targets.par_iter())
                .map(|((state, mask), &target)| Self::apply(state, mask, target))
                .collect()
        } else {
            next_states
                .as_mut_slice()
                .chunks_mut(width)
                .zip(masks.as_mut_slice().chunks_mut(num_actions))
                .zip(targets.iter())
                .map(|((state, mask), &target)| Self::apply(state, mask, target))
                .collect()
        };
        let (rewards, terminals): (Vec<f32>, Vec<bool>) = outcomes.into_iter().unzip();

        Ok(StepOutput {
            states: next_states,
            masks,
            rewards,
            terminals,
            infos: vec![StepInfo::default(); n],
        })
    }

    fn check_win(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError> {
        Self::scan_lines(states, false)
    }

    fn check_loss(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError> {
        Self::scan_lines(states, true)
    }

    fn check_terminal(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError> {
        Self::validate(states)?;
        Ok(states
            .rows()
            .map(|state| Self::is_terminal(&state[..R::CELLS], state[R::CELLS]))
            .collect())
    }

    fn legal_masks(&self, states: &StateBatch) -> Result<MaskBatch, SimulatorError> {
        Self::validate(states)?;
        let mut masks = Batch::filled(states.len(), R::NUM_ACTIONS, false);
        for (state, mask) in states
            .rows()
            .zip(masks.as_mut_slice().chunks_mut(R::NUM_ACTIONS))
        {
            let board = &state[..R::CELLS];
            if !Self::is_terminal(board, state[R::CELLS]) {
                Self::fill_mask(board, mask);
            }
        }
        Ok(masks)
    }

    fn render(&self, state: &[Cell]) -> Result<String, SimulatorError> {
        if state.len() != Self::STATE_LEN {
            return Err(SimulatorError::StateWidth {
                expected: Self::STATE_LEN,
                actual: state.len(),
            });
        }
        Self::validate_state(0, state)?;

        let symbols = self.options.symbols;
        let mut out = String::new();
        R::render_board(&state[..R::CELLS], symbols, &mut out);
        out.push_str(&format!(
            "To move: {}\n",
            cell_symbol(state[R::CELLS], symbols)
        ));
        Ok(out)
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
