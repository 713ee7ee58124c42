//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so every binary agrees
//! on the same defaults.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    simulator: SimulatorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    env_id: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SimulatorDefaults {
    parallel_threshold: usize,
    #[serde(default)]
    player_symbols: Option<String>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn env_id() -> &'static str {
    &DEFAULTS.common.env_id
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Simulator
pub fn parallel_threshold() -> usize {
    DEFAULTS.simulator.parallel_threshold
}
pub fn player_symbols() -> Option<&'static str> {
    DEFAULTS.simulator.player_symbols.as_deref()
}
