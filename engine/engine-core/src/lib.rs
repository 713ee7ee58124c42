//! Core traits and types for batched board game simulation
//!
//! This crate provides the fundamental abstractions used by self-play drivers:
//! - `BoardRules`: Typed per-board rules implemented by each game
//! - `Simulator`: Stateless, batched contract used polymorphically by callers
//! - `BatchAdapter`: Automatic conversion from board rules to the batched contract
//! - `ActionSpace`: Action count and mask/state shapes of a game variant
//! - `Factory`: Deferred construction of independent simulator instances

pub mod action_space;
pub mod adapter;
pub mod batch;
pub mod board_game;
pub mod error;
pub mod factory;
pub mod simulator;
pub mod typed;

// Re-export main types for convenience
pub use action_space::{ActionSpace, BoardType};
pub use adapter::{BatchAdapter, EngineOptions};
pub use batch::{Batch, MaskBatch, ResetOutput, StateBatch, StepInfo, StepOutput};
pub use board_game::Cell;
pub use error::SimulatorError;
pub use factory::Factory;
pub use simulator::Simulator;
pub use typed::BoardRules;
