//! Centralized board layout and tuning constants for the simulation.
//!
//! The default board reproduces the classic 90-square layout. Custom boards
//! are supplied through [`crate::board::BoardConfig`].

use crate::board::Square;

// Die ----------------------------------------------------------------------
pub const DIE_FACES: u8 = 6;

// Default board -----------------------------------------------------------
pub const DEFAULT_GOAL: Square = 90;
pub const DEFAULT_LADDERS: [(Square, Square); 7] = [
    (1, 40),
    (8, 10),
    (36, 52),
    (43, 62),
    (49, 79),
    (65, 82),
    (68, 85),
];
pub const DEFAULT_CHUTES: [(Square, Square); 7] = [
    (24, 5),
    (33, 3),
    (42, 30),
    (56, 37),
    (64, 27),
    (74, 12),
    (87, 70),
];

// Player variants -----------------------------------------------------------
pub const DEFAULT_RESILIENT_EXTRA_STEPS: u32 = 1;
pub const DEFAULT_LAZY_DROPPED_STEPS: u32 = 1;

// Simulation ------------------------------------------------------------------
pub(crate) const DEFAULT_SHUFFLE_PLAYERS: bool = true;
