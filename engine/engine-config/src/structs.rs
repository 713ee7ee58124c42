//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;
use tracing::warn;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_env_id() -> String {
    defaults::env_id().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_parallel_threshold() -> usize {
    defaults::parallel_threshold()
}
fn d_player_symbols() -> Option<String> {
    defaults::player_symbols().map(Into::into)
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    /// Which simulator the self-play driver builds
    #[serde(default = "d_env_id")]
    pub env_id: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            env_id: defaults::env_id().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Batched simulator tuning
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Minimum batch size stepped on the rayon pool (0 = always sequential)
    #[serde(default = "d_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Two glyphs, first then second player (e.g. "XO")
    #[serde(default = "d_player_symbols")]
    pub player_symbols: Option<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: defaults::parallel_threshold(),
            player_symbols: defaults::player_symbols().map(Into::into),
        }
    }
}

impl SimulatorConfig {
    /// Parsed `player_symbols`, or `None` when unset or not exactly two
    /// characters
    pub fn symbols(&self) -> Option<[char; 2]> {
        let raw = self.player_symbols.as_deref()?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(first), Some(second), None) => Some([first, second]),
            _ => {
                warn!(
                    "Ignoring player_symbols={:?}: expected exactly two characters",
                    raw
                );
                None
            }
        }
    }
}
