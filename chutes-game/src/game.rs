//! Single-game runner: round-robin turns until someone reaches the goal.
use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::dice::RollSource;
use crate::player::{Movement, PlayerKind, PlayerState, Turn, VariantTuning};

/// Failures that abort a game (and the simulation running it).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs at least one player")]
    EmptyLineup,
    #[error("die roll {roll} outside 1..={faces}")]
    InvalidRoll { roll: u8, faces: u8 },
    #[error("scripted rolls exhausted after {consumed} draws")]
    RollsExhausted { consumed: usize },
    #[error("failed to seed die from OS entropy: {0}")]
    Entropy(String),
    #[error("no player reached the goal within {limit} rounds")]
    RoundLimit { limit: u32 },
}

/// Outcome of one completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Turns the winner needed, excluding voided turns.
    pub steps: u32,
    pub winner: PlayerKind,
    /// Lineup index of the winner.
    pub seat: usize,
    /// Rounds started before the game ended, including the final partial one.
    pub rounds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Finished(GameResult),
}

/// One game over a shared board.
#[derive(Debug, Clone)]
pub struct Game<'a> {
    board: &'a Board,
    players: Vec<PlayerState>,
    phase: GamePhase,
    rounds: u32,
    max_rounds: Option<u32>,
}

impl<'a> Game<'a> {
    /// Seat one fresh player per lineup entry, all off the board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyLineup`] when nobody could ever win.
    pub fn new(
        board: &'a Board,
        lineup: &[PlayerKind],
        tuning: &VariantTuning,
    ) -> Result<Self, GameError> {
        if lineup.is_empty() {
            return Err(GameError::EmptyLineup);
        }
        let players = lineup
            .iter()
            .map(|&kind| PlayerState::new(Movement::for_kind(kind, tuning)))
            .collect();
        Ok(Self {
            board,
            players,
            phase: GamePhase::Running,
            rounds: 0,
            max_rounds: None,
        })
    }

    /// Abort with [`GameError::RoundLimit`] after `max_rounds` full rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Play until the first player reaches the goal.
    ///
    /// A finished game returns its stored result without rolling again.
    ///
    /// # Errors
    ///
    /// Propagates roll failures and the optional round limit.
    pub fn play<D>(&mut self, dice: &mut D) -> Result<GameResult, GameError>
    where
        D: RollSource + ?Sized,
    {
        if let GamePhase::Finished(result) = self.phase {
            return Ok(result);
        }
        loop {
            if let Some(limit) = self.max_rounds
                && self.rounds >= limit
            {
                return Err(GameError::RoundLimit { limit });
            }
            self.rounds += 1;
            if let Some(result) = self.play_round(dice)? {
                self.phase = GamePhase::Finished(result);
                return Ok(result);
            }
        }
    }

    fn play_round<D>(&mut self, dice: &mut D) -> Result<Option<GameResult>, GameError>
    where
        D: RollSource + ?Sized,
    {
        for (seat, player) in self.players.iter_mut().enumerate() {
            let turn = player.take_turn(self.board, dice)?;
            trace_turn(self.rounds, seat, player, turn);
            if self.board.goal_reached(player.position()) {
                return Ok(Some(GameResult {
                    steps: player.steps(),
                    winner: player.kind(),
                    seat,
                    rounds: self.rounds,
                }));
            }
        }
        Ok(None)
    }
}

fn trace_turn(round: u32, seat: usize, player: &PlayerState, turn: Turn) {
    match turn {
        Turn::Moved {
            roll,
            from,
            candidate,
            to,
        } => trace!(
            "round {round} seat {seat} ({}): rolled {roll}, {from} -> {candidate} -> {to}",
            player.kind()
        ),
        Turn::Skipped { roll } => trace!(
            "round {round} seat {seat} ({}): rolled {roll}, turn voided at {}",
            player.kind(),
            player.position()
        ),
    }
}
