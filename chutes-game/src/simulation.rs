//! Repeated-game driver and per-variant aggregation.
use log::{debug, info};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::board::Board;
use crate::config::{ConfigError, SimulationConfig};
use crate::dice::{Die, RollSource};
use crate::game::{Game, GameError, GameResult};
use crate::player::{PlayerKind, VariantTuning};
use crate::stats::{self, SimulationSummary};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Runs many independent games over one board and lineup.
///
/// The lineup is fixed at construction; every game starts from fresh
/// player states and appends one [`GameResult`].
#[derive(Debug)]
pub struct Simulation<D = Die> {
    board: Board,
    lineup: Vec<PlayerKind>,
    tuning: VariantTuning,
    max_rounds: Option<u32>,
    seed: Option<u64>,
    dice: D,
    results: Vec<GameResult>,
}

impl Simulation<Die> {
    /// Validate `config`, seed the die and fix the seating order.
    ///
    /// With `shuffle_players` the lineup is shuffled once from the same
    /// stream that later drives the rolls, so a seed reproduces both.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] for an invalid configuration and
    /// [`SimulationError::Game`] when OS entropy is unavailable.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let board = config.validate()?;
        let mut dice = match config.seed {
            Some(seed) => Die::seeded(seed),
            None => Die::from_entropy()?,
        };
        let mut lineup = config.players.clone();
        if config.shuffle_players {
            lineup.shuffle(dice.rng_mut());
        }
        Ok(Self::assemble(config, board, lineup, dice))
    }
}

impl<D: RollSource> Simulation<D> {
    /// Build over an injected roll source, keeping the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] for an invalid configuration.
    pub fn with_dice(config: &SimulationConfig, dice: D) -> Result<Self, SimulationError> {
        let board = config.validate()?;
        Ok(Self::assemble(config, board, config.players.clone(), dice))
    }

    fn assemble(
        config: &SimulationConfig,
        board: Board,
        lineup: Vec<PlayerKind>,
        dice: D,
    ) -> Self {
        Self {
            board,
            lineup,
            tuning: config.tuning,
            max_rounds: config.max_rounds,
            seed: config.seed,
            dice,
            results: Vec::new(),
        }
    }

    /// Play `games` games in sequence, recording each result.
    ///
    /// Results from earlier calls are kept; the first failing game aborts
    /// the run and nothing is recorded for it.
    ///
    /// # Errors
    ///
    /// Propagates the first [`GameError`].
    pub fn run(&mut self, games: usize) -> Result<&[GameResult], SimulationError> {
        info!(
            "running {games} games with {} players (seed {:?})",
            self.lineup.len(),
            self.seed
        );
        let start = self.results.len();
        self.results.reserve(games);
        for index in 0..games {
            let result = self.play_game()?;
            debug!(
                "game {}: {} at seat {} won in {} steps ({} rounds)",
                start + index + 1,
                result.winner,
                result.seat,
                result.steps,
                result.rounds
            );
            self.results.push(result);
        }
        info!("finished {games} games; wins {:?}", self.wins_per_kind());
        Ok(&self.results[start..])
    }

    /// Play a single game without recording it.
    ///
    /// # Errors
    ///
    /// Propagates roll failures and the round limit.
    pub fn play_game(&mut self) -> Result<GameResult, GameError> {
        let mut game =
            Game::new(&self.board, &self.lineup, &self.tuning)?.with_max_rounds(self.max_rounds);
        game.play(&mut self.dice)
    }

    #[must_use]
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    #[must_use]
    pub fn wins_per_kind(&self) -> BTreeMap<PlayerKind, usize> {
        stats::wins_per_kind(&self.results)
    }

    #[must_use]
    pub fn durations_per_kind(&self) -> BTreeMap<PlayerKind, Vec<u32>> {
        stats::durations_per_kind(&self.results)
    }

    #[must_use]
    pub fn participants_per_kind(&self) -> BTreeMap<PlayerKind, usize> {
        stats::participants_per_kind(&self.lineup)
    }

    /// Seating order used by every game.
    #[must_use]
    pub fn lineup(&self) -> &[PlayerKind] {
        &self.lineup
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Configured seed; `None` for entropy-seeded runs.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub const fn tuning(&self) -> VariantTuning {
        self.tuning
    }

    #[must_use]
    pub const fn dice(&self) -> &D {
        &self.dice
    }

    #[must_use]
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary::from_results(&self.results, &self.lineup, self.seed)
    }
}
