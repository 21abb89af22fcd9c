//! Chutes & Ladders Simulation Engine
//!
//! Platform-agnostic board rules, player movement variants and a batch
//! simulator that aggregates results per variant.
//! This crate has no UI or I/O beyond the `log` facade.

pub mod board;
pub mod config;
pub mod constants;
pub mod dice;
pub mod game;
pub mod numbers;
pub mod player;
pub mod simulation;
pub mod stats;

// Re-export commonly used types
pub use board::{Board, BoardConfig, BoardError, Shortcut, Square};
pub use config::{ConfigError, SimulationConfig};
pub use dice::{Die, RollSource, ScriptedRolls};
pub use game::{Game, GameError, GamePhase, GameResult};
pub use player::{Movement, PlayerKind, PlayerState, Turn, VariantTuning};
pub use simulation::{Simulation, SimulationError};
pub use stats::{DurationStats, KindSummary, SimulationSummary};
