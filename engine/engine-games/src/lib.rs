//! Simulator selection for the batched engine
//!
//! This crate is the single place that knows every available game. Drivers
//! resolve an environment id (usually `common.env_id` from config) into a
//! [`Factory`] and spawn one simulator per worker from it.
//!
//! # Usage
//!
//! ```rust
//! use engine_config::CentralConfig;
//! use engine_games::factory_from_config;
//!
//! let factory = factory_from_config(&CentralConfig::default()).unwrap();
//! let sim = factory.create();
//! assert_eq!(sim.env_id(), "tictactoe");
//! ```

use std::fmt;
use std::str::FromStr;

use engine_config::CentralConfig;
use engine_core::{ActionSpace, BoardRules, EngineOptions, Factory, Simulator};
use thiserror::Error;
use tracing::{debug, warn};

pub use games_connect4::ConnectFour;
pub use games_tictactoe::TicTacToe;

/// Environment id that does not name a known simulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown simulator '{env_id}' (available: {available})")]
pub struct UnknownSimulator {
    pub env_id: String,
    pub available: String,
}

/// Every simulator this build ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulatorKind {
    TicTacToe,
    ConnectFour,
}

impl SimulatorKind {
    /// All kinds, in a stable order
    pub fn all() -> &'static [SimulatorKind] {
        &[SimulatorKind::TicTacToe, SimulatorKind::ConnectFour]
    }

    pub fn env_id(self) -> &'static str {
        match self {
            SimulatorKind::TicTacToe => games_tictactoe::Rules::ENV_ID,
            SimulatorKind::ConnectFour => games_connect4::Rules::ENV_ID,
        }
    }

    pub fn action_space(self) -> ActionSpace {
        match self {
            SimulatorKind::TicTacToe => games_tictactoe::Rules::action_space(),
            SimulatorKind::ConnectFour => games_connect4::Rules::action_space(),
        }
    }

    /// Factory of type-erased simulators of this kind
    pub fn factory(self, options: EngineOptions) -> Factory<Box<dyn Simulator>> {
        match self {
            SimulatorKind::TicTacToe => {
                games_tictactoe::factory(options).map(|sim| Box::new(sim) as Box<dyn Simulator>)
            }
            SimulatorKind::ConnectFour => {
                games_connect4::factory(options).map(|sim| Box::new(sim) as Box<dyn Simulator>)
            }
        }
    }
}

impl fmt::Display for SimulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_id())
    }
}

impl FromStr for SimulatorKind {
    type Err = UnknownSimulator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tictactoe" => Ok(SimulatorKind::TicTacToe),
            "connect4" | "connect_four" => Ok(SimulatorKind::ConnectFour),
            other => Err(UnknownSimulator {
                env_id: other.to_string(),
                available: list_simulators().join(", "),
            }),
        }
    }
}

/// Environment ids of every available simulator
pub fn list_simulators() -> Vec<&'static str> {
    SimulatorKind::all().iter().map(|kind| kind.env_id()).collect()
}

/// Engine options described by the `[simulator]` config section
pub fn options_from_config(config: &CentralConfig) -> EngineOptions {
    let options =
        EngineOptions::default().with_parallel_threshold(config.simulator.parallel_threshold);
    match config.simulator.symbols() {
        Some(symbols) => options.with_symbols(symbols),
        None => options,
    }
}

/// Resolve the configured `env_id` into a simulator factory
pub fn factory_from_config(
    config: &CentralConfig,
) -> Result<Factory<Box<dyn Simulator>>, UnknownSimulator> {
    let kind = config.common.env_id.parse::<SimulatorKind>().map_err(|e| {
        warn!("{}", e);
        e
    })?;
    let options = options_from_config(config);
    debug!(
        env_id = kind.env_id(),
        parallel_threshold = options.parallel_threshold,
        "Resolved simulator factory"
    );
    Ok(kind.factory(options))
}
