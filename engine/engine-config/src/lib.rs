//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs, loading logic and tracing
//! setup shared by every self-play driver built on the simulator engine.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`SELFPLAY_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! SELFPLAY_<SECTION>_<KEY>=value
//!
//! Examples:
//!     SELFPLAY_COMMON_ENV_ID=connect4
//!     SELFPLAY_COMMON_LOG_LEVEL=debug
//!     SELFPLAY_SIMULATOR_PARALLEL_THRESHOLD=0
//!     SELFPLAY_SIMULATOR_PLAYER_SYMBOLS=RY
//! ```

mod defaults;
mod loader;
mod logging;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, load_from_str, CONFIG_PATH_ENV,
    CONFIG_SEARCH_PATHS,
};
pub use logging::init_tracing;
pub use structs::*;
