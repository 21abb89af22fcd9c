//! Board layout and shortcut resolution.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::constants::{DEFAULT_CHUTES, DEFAULT_GOAL, DEFAULT_LADDERS};

/// Index of a square on the board. Position 0 is off-board, before square 1.
pub type Square = u32;

/// Errors raised when a board layout violates its invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("goal must be at least 1")]
    ZeroGoal,
    #[error("square {square} is both a ladder and a chute source")]
    OverlappingSource { square: Square },
    #[error("shortcut at square {square} points to itself")]
    SelfLoop { square: Square },
    #[error("ladder {from} -> {to} does not climb")]
    LadderNotAscending { from: Square, to: Square },
    #[error("chute {from} -> {to} does not descend")]
    ChuteNotDescending { from: Square, to: Square },
    #[error("shortcut {from} -> {to} lands beyond goal {goal}")]
    DestinationBeyondGoal { from: Square, to: Square, goal: Square },
    #[error("shortcut {from} -> {to} lands on another shortcut")]
    ChainedShortcut { from: Square, to: Square },
}

/// Kind of shortcut occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    Ladder { to: Square },
    Chute { to: Square },
}

impl Shortcut {
    #[must_use]
    pub const fn destination(self) -> Square {
        match self {
            Self::Ladder { to } | Self::Chute { to } => to,
        }
    }
}

/// Serializable description of a board, validated into a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "BoardConfig::default_ladders")]
    pub ladders: BTreeMap<Square, Square>,
    #[serde(default = "BoardConfig::default_chutes")]
    pub chutes: BTreeMap<Square, Square>,
    #[serde(default = "BoardConfig::default_goal")]
    pub goal: Square,
}

impl BoardConfig {
    fn default_ladders() -> BTreeMap<Square, Square> {
        DEFAULT_LADDERS.into_iter().collect()
    }

    fn default_chutes() -> BTreeMap<Square, Square> {
        DEFAULT_CHUTES.into_iter().collect()
    }

    const fn default_goal() -> Square {
        DEFAULT_GOAL
    }

    /// Validate the layout and build an immutable [`Board`].
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] describing the first violated invariant.
    pub fn build(&self) -> Result<Board, BoardError> {
        Board::new(self.ladders.clone(), self.chutes.clone(), self.goal)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            ladders: Self::default_ladders(),
            chutes: Self::default_chutes(),
            goal: Self::default_goal(),
        }
    }
}

/// Immutable rule object mapping shortcut sources to their destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    ladders: BTreeMap<Square, Square>,
    chutes: BTreeMap<Square, Square>,
    goal: Square,
    ladder_destinations: BTreeSet<Square>,
    chute_destinations: BTreeSet<Square>,
}

impl Board {
    /// Build a board from explicit shortcut maps.
    ///
    /// A valid board has a positive goal, ladders that climb, chutes that
    /// descend, no square that is both a ladder and a chute source, no
    /// destination past the goal, and no destination that is itself a
    /// shortcut source. The last rule keeps every landing fully resolved
    /// after one adjustment.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] describing the first violated invariant.
    pub fn new(
        ladders: BTreeMap<Square, Square>,
        chutes: BTreeMap<Square, Square>,
        goal: Square,
    ) -> Result<Self, BoardError> {
        validate_layout(&ladders, &chutes, goal)?;
        let ladder_destinations = ladders.values().copied().collect();
        let chute_destinations = chutes.values().copied().collect();
        Ok(Self {
            ladders,
            chutes,
            goal,
            ladder_destinations,
            chute_destinations,
        })
    }

    #[must_use]
    pub const fn goal(&self) -> Square {
        self.goal
    }

    #[must_use]
    pub const fn ladders(&self) -> &BTreeMap<Square, Square> {
        &self.ladders
    }

    #[must_use]
    pub const fn chutes(&self) -> &BTreeMap<Square, Square> {
        &self.chutes
    }

    /// Squares some ladder lands on.
    #[must_use]
    pub const fn ladder_destinations(&self) -> &BTreeSet<Square> {
        &self.ladder_destinations
    }

    /// Squares some chute lands on.
    #[must_use]
    pub const fn chute_destinations(&self) -> &BTreeSet<Square> {
        &self.chute_destinations
    }

    #[must_use]
    pub const fn goal_reached(&self, position: Square) -> bool {
        position >= self.goal
    }

    #[must_use]
    pub fn shortcut_at(&self, position: Square) -> Option<Shortcut> {
        if let Some(&to) = self.ladders.get(&position) {
            return Some(Shortcut::Ladder { to });
        }
        self.chutes
            .get(&position)
            .map(|&to| Shortcut::Chute { to })
    }

    /// Signed offset that moves a player standing on `position` to the
    /// shortcut destination: `destination - position`, or 0 off-shortcut.
    #[must_use]
    pub fn position_adjustment(&self, position: Square) -> i64 {
        self.shortcut_at(position).map_or(0, |shortcut| {
            i64::from(shortcut.destination()) - i64::from(position)
        })
    }

    /// Square a player ends on after landing on `position`.
    ///
    /// Always equal to `position + position_adjustment(position)`.
    #[must_use]
    pub fn landing_square(&self, position: Square) -> Square {
        self.shortcut_at(position)
            .map_or(position, Shortcut::destination)
    }

    /// Snapshot the layout back into its serializable form.
    #[must_use]
    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            ladders: self.ladders.clone(),
            chutes: self.chutes.clone(),
            goal: self.goal,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        let ladders: BTreeMap<Square, Square> = DEFAULT_LADDERS.into_iter().collect();
        let chutes: BTreeMap<Square, Square> = DEFAULT_CHUTES.into_iter().collect();
        Self {
            ladder_destinations: ladders.values().copied().collect(),
            chute_destinations: chutes.values().copied().collect(),
            ladders,
            chutes,
            goal: DEFAULT_GOAL,
        }
    }
}

fn validate_layout(
    ladders: &BTreeMap<Square, Square>,
    chutes: &BTreeMap<Square, Square>,
    goal: Square,
) -> Result<(), BoardError> {
    if goal == 0 {
        return Err(BoardError::ZeroGoal);
    }
    if let Some(&square) = ladders.keys().find(|&&square| chutes.contains_key(&square)) {
        return Err(BoardError::OverlappingSource { square });
    }
    for (&from, &to) in ladders {
        if from == to {
            return Err(BoardError::SelfLoop { square: from });
        }
        if to < from {
            return Err(BoardError::LadderNotAscending { from, to });
        }
    }
    for (&from, &to) in chutes {
        if from == to {
            return Err(BoardError::SelfLoop { square: from });
        }
        if to > from {
            return Err(BoardError::ChuteNotDescending { from, to });
        }
    }
    for (&from, &to) in ladders.iter().chain(chutes) {
        if to > goal {
            return Err(BoardError::DestinationBeyondGoal { from, to, goal });
        }
        if ladders.contains_key(&to) || chutes.contains_key(&to) {
            return Err(BoardError::ChainedShortcut { from, to });
        }
    }
    Ok(())
}
