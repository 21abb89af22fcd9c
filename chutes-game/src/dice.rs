//! Die-roll sources injected into the game runner.
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

use crate::constants::DIE_FACES;
use crate::game::GameError;

/// Anything that can produce six-sided die rolls.
///
/// A failing source is fatal for the run; callers never retry.
pub trait RollSource {
    /// Produce the next roll.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] when the source cannot produce a roll.
    fn roll(&mut self) -> Result<u8, GameError>;
}

impl<T: RollSource + ?Sized> RollSource for &mut T {
    fn roll(&mut self) -> Result<u8, GameError> {
        (**self).roll()
    }
}

/// Fair six-sided die over an injected generator, counting every draw.
#[derive(Debug, Clone)]
pub struct Die<R = ChaCha20Rng> {
    rng: R,
    rolls: u64,
}

impl Die<ChaCha20Rng> {
    /// Deterministic die; the same seed always yields the same roll stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Die seeded from operating-system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Entropy`] when the OS generator is unavailable.
    pub fn from_entropy() -> Result<Self, GameError> {
        ChaCha20Rng::from_rng(OsRng)
            .map(Self::new)
            .map_err(|err| GameError::Entropy(err.to_string()))
    }
}

impl<R: RngCore> Die<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng, rolls: 0 }
    }

    /// Number of rolls drawn so far.
    #[must_use]
    pub const fn rolls(&self) -> u64 {
        self.rolls
    }

    /// Underlying generator, for consumers sharing the same stream.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: RngCore> RollSource for Die<R> {
    fn roll(&mut self) -> Result<u8, GameError> {
        self.rolls = self.rolls.saturating_add(1);
        Ok(self.rng.gen_range(1..=DIE_FACES))
    }
}

/// Replays a fixed sequence of rolls, then fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    pending: VecDeque<u8>,
    consumed: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            pending: rolls.into_iter().collect(),
            consumed: 0,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> Result<u8, GameError> {
        let roll = self.pending.pop_front().ok_or(GameError::RollsExhausted {
            consumed: self.consumed,
        })?;
        self.consumed += 1;
        Ok(roll)
    }
}
