//! Simulator contract shared by every game variant
//!
//! The trait is object safe, so drivers can hold a `Box<dyn Simulator>` and
//! stay agnostic of the game being played. Implementations keep no state
//! between calls: every operation reads only its explicit inputs, which makes
//! one instance safe to share across threads.

use crate::action_space::ActionSpace;
use crate::batch::{MaskBatch, ResetOutput, StateBatch, StepOutput};
use crate::board_game::Cell;
use crate::error::SimulatorError;

/// Batched, stateless game simulator
///
/// # Example Usage
///
/// ```rust
/// # use engine_core::batch::StateBatch;
/// # use engine_core::error::SimulatorError;
/// # use engine_core::simulator::Simulator;
///
/// fn play_first_legal(sim: &dyn Simulator, n: usize) -> Result<StateBatch, SimulatorError> {
///     let reset = sim.reset_bulk(n)?;
///     let space = sim.action_space();
///
///     let actions: Vec<usize> = reset
///         .masks
///         .rows()
///         .map(|mask| space.legal_actions(mask)[0])
///         .collect();
///
///     let step = sim.step_bulk(&reset.states, &actions)?;
///     Ok(step.states)
/// }
/// ```
pub trait Simulator: Send + Sync + std::fmt::Debug + 'static {
    /// Environment identifier of the game variant
    fn env_id(&self) -> &'static str;

    /// Action count and state/mask shapes of the game variant
    fn action_space(&self) -> ActionSpace;

    /// Create `n` fresh games: empty boards, first player (+1) to move,
    /// every action legal.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::EmptyBatch` when `n` is zero
    fn reset_bulk(&self, n: usize) -> Result<ResetOutput, SimulatorError>;

    /// Apply one action per state.
    ///
    /// Input states are never modified; the next states are returned. Turn
    /// alternates for every state, including ones that just finished.
    ///
    /// # Errors
    ///
    /// Fails without producing any output if any state is malformed or
    /// already terminal, or if any action is out of range or not playable.
    fn step_bulk(
        &self,
        states: &StateBatch,
        actions: &[usize],
    ) -> Result<StepOutput, SimulatorError>;

    /// Whether the player to move already holds a winning configuration
    fn check_win(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError>;

    /// Whether the opponent of the player to move holds a winning configuration
    ///
    /// Equivalent to `check_win` with every marker negated.
    fn check_loss(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError>;

    /// Whether each game has concluded: win, loss, or no legal action left
    fn check_terminal(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError>;

    /// Legality masks for arbitrary states; all-false for terminal states
    fn legal_masks(&self, states: &StateBatch) -> Result<MaskBatch, SimulatorError>;

    /// Human-readable drawing of a single state, for debugging
    fn render(&self, state: &[Cell]) -> Result<String, SimulatorError>;
}

impl<S: Simulator + ?Sized> Simulator for Box<S> {
    fn env_id(&self) -> &'static str {
        (**self).env_id()
    }

    fn action_space(&self) -> ActionSpace {
        (**self).action_space()
    }

    fn reset_bulk(&self, n: usize) -> Result<ResetOutput, SimulatorError> {
        (**self).reset_bulk(n)
    }

    fn step_bulk(
        &self,
        states: &StateBatch,
        actions: &[usize],
    ) -> Result<StepOutput, SimulatorError> {
        (**self).step_bulk(states, actions)
    }

    fn check_win(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError> {
        (**self).check_win(states)
    }

    fn check_loss(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError> {
        (**self).check_loss(states)
    }

    fn check_terminal(&self, states: &StateBatch) -> Result<Vec<bool>, SimulatorError> {
        (**self).check_terminal(states)
    }

    fn legal_masks(&self, states: &StateBatch) -> Result<MaskBatch, SimulatorError> {
        (**self).legal_masks(states)
    }

    fn render(&self, state: &[Cell]) -> Result<String, SimulatorError> {
        (**self).render(state)
    }
}
