//! Invalid-argument errors raised by batched simulator operations
//!
//! Every variant describes a caller mistake. Operations check their whole
//! input before producing any output, so an error always means nothing was
//! computed for any state of the batch.

/// Error type shared by all simulator operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulatorError {
    #[error("Batch must contain at least one state")]
    EmptyBatch,
    #[error("Batch of {len} values cannot be split into rows of width {width}")]
    BatchShape { len: usize, width: usize },
    #[error("State width {actual} does not match the expected {expected}")]
    StateWidth { expected: usize, actual: usize },
    #[error("Got {actual} actions for a batch of {expected} states")]
    ActionCountMismatch { expected: usize, actual: usize },
    #[error("State {index} is malformed: {reason}")]
    MalformedState { index: usize, reason: String },
    #[error("State {index} is already terminal")]
    TerminalState { index: usize },
    #[error("Action {action} for state {index} is outside the action space 0..{num_actions}")]
    ActionOutOfRange {
        index: usize,
        action: usize,
        num_actions: usize,
    },
    #[error("Action {action} for state {index} targets an occupied cell or full column")]
    IllegalAction { index: usize, action: usize },
}

impl SimulatorError {
    /// Index of the offending state, when the error concerns a single one
    pub fn state_index(&self) -> Option<usize> {
        match self {
            SimulatorError::MalformedState { index, .. }
            | SimulatorError::TerminalState { index }
            | SimulatorError::ActionOutOfRange { index, .. }
            | SimulatorError::IllegalAction { index, .. } => Some(*index),
            _ => None,
        }
    }
}
