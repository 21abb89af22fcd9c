//! Player variants and their per-turn movement rules.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Square};
use crate::config::ConfigError;
use crate::constants::{DEFAULT_LAZY_DROPPED_STEPS, DEFAULT_RESILIENT_EXTRA_STEPS, DIE_FACES};
use crate::dice::RollSource;
use crate::game::GameError;

/// Movement behaviour a player follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    #[serde(alias = "Player")]
    Standard,
    #[serde(alias = "ResilientPlayer")]
    Resilient,
    #[serde(alias = "LazyPlayer")]
    Lazy,
}

impl PlayerKind {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Resilient, Self::Lazy];

    /// Display label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Player",
            Self::Resilient => "ResilientPlayer",
            Self::Lazy => "LazyPlayer",
        }
    }

    /// Short key used in configuration files and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Resilient => "resilient",
            Self::Lazy => "lazy",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                token.eq_ignore_ascii_case(kind.key()) || token.eq_ignore_ascii_case(kind.label())
            })
            .ok_or_else(|| ConfigError::UnknownPlayerKind(token.to_string()))
    }
}

/// Magnitudes of the resilient bonus and the lazy penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTuning {
    #[serde(default = "VariantTuning::default_extra_steps")]
    pub resilient_extra_steps: u32,
    #[serde(default = "VariantTuning::default_dropped_steps")]
    pub lazy_dropped_steps: u32,
}

impl VariantTuning {
    const fn default_extra_steps() -> u32 {
        DEFAULT_RESILIENT_EXTRA_STEPS
    }

    const fn default_dropped_steps() -> u32 {
        DEFAULT_LAZY_DROPPED_STEPS
    }

    /// Largest penalty that still lets a lazy player leave a ladder landing.
    pub const MAX_DROPPED_STEPS: u32 = DIE_FACES as u32 - 1;

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.lazy_dropped_steps > Self::MAX_DROPPED_STEPS {
            return Err(ConfigError::DroppedStepsTooLarge {
                value: self.lazy_dropped_steps,
                max: Self::MAX_DROPPED_STEPS,
            });
        }
        Ok(())
    }
}

impl Default for VariantTuning {
    fn default() -> Self {
        Self {
            resilient_extra_steps: Self::default_extra_steps(),
            lazy_dropped_steps: Self::default_dropped_steps(),
        }
    }
}

/// Movement rule of one player, carrying its tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Moves by the die roll.
    Standard,
    /// Gets `extra_steps` on top of the roll when standing where a chute lands.
    Resilient { extra_steps: u32 },
    /// Loses `dropped_steps` from the roll when standing where a ladder lands,
    /// forfeiting the turn when the roll is smaller than the penalty.
    Lazy { dropped_steps: u32 },
}

impl Movement {
    #[must_use]
    pub const fn for_kind(kind: PlayerKind, tuning: &VariantTuning) -> Self {
        match kind {
            PlayerKind::Standard => Self::Standard,
            PlayerKind::Resilient => Self::Resilient {
                extra_steps: tuning.resilient_extra_steps,
            },
            PlayerKind::Lazy => Self::Lazy {
                dropped_steps: tuning.lazy_dropped_steps,
            },
        }
    }

    #[must_use]
    pub const fn kind(self) -> PlayerKind {
        match self {
            Self::Standard => PlayerKind::Standard,
            Self::Resilient { .. } => PlayerKind::Resilient,
            Self::Lazy { .. } => PlayerKind::Lazy,
        }
    }
}

/// What happened during a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Moved {
        roll: u8,
        from: Square,
        candidate: Square,
        to: Square,
    },
    /// The roll was discarded and nothing changed.
    Skipped { roll: u8 },
}

impl Turn {
    #[must_use]
    pub const fn roll(self) -> u8 {
        match self {
            Self::Moved { roll, .. } | Self::Skipped { roll } => roll,
        }
    }

    #[must_use]
    pub const fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Position and turn counter of one player within one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    movement: Movement,
    position: Square,
    steps: u32,
}

impl PlayerState {
    /// Fresh player off the board.
    #[must_use]
    pub const fn new(movement: Movement) -> Self {
        Self {
            movement,
            position: 0,
            steps: 0,
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: Square) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn position(&self) -> Square {
        self.position
    }

    /// Turns that moved the player; voided turns are not counted.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub const fn kind(&self) -> PlayerKind {
        self.movement.kind()
    }

    #[must_use]
    pub const fn movement(&self) -> Movement {
        self.movement
    }

    /// Roll once and move according to this player's variant.
    ///
    /// # Errors
    ///
    /// Propagates roll-source failures and rejects rolls outside `1..=6`.
    pub fn take_turn<D>(&mut self, board: &Board, dice: &mut D) -> Result<Turn, GameError>
    where
        D: RollSource + ?Sized,
    {
        let roll = dice.roll()?;
        if !(1..=DIE_FACES).contains(&roll) {
            return Err(GameError::InvalidRoll {
                roll,
                faces: DIE_FACES,
            });
        }
        let pips = u32::from(roll);

        let movement = self.movement;
        let turn = match movement {
            Movement::Resilient { extra_steps }
                if board.chute_destinations().contains(&self.position) =>
            {
                self.advance(board, roll, pips.saturating_add(extra_steps))
            }
            Movement::Lazy { dropped_steps }
                if board.ladder_destinations().contains(&self.position) =>
            {
                match pips.checked_sub(dropped_steps) {
                    Some(stride) => self.advance(board, roll, stride),
                    None => Turn::Skipped { roll },
                }
            }
            Movement::Standard | Movement::Resilient { .. } | Movement::Lazy { .. } => {
                self.advance(board, roll, pips)
            }
        };
        Ok(turn)
    }

    fn advance(&mut self, board: &Board, roll: u8, stride: u32) -> Turn {
        let from = self.position;
        let candidate = from.saturating_add(stride);
        let to = board.landing_square(candidate);
        self.position = to;
        self.steps = self.steps.saturating_add(1);
        Turn::Moved {
            roll,
            from,
            candidate,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Die, ScriptedRolls};
    use std::collections::BTreeMap;

    fn sample_board() -> Board {
        Board::new(
            BTreeMap::from([(1, 40), (8, 10)]),
            BTreeMap::from([(24, 5), (33, 3)]),
            90,
        )
        .unwrap()
    }

    fn player(kind: PlayerKind) -> PlayerState {
        PlayerState::new(Movement::for_kind(kind, &VariantTuning::default()))
    }

    #[test]
    fn standard_first_roll_takes_ladder() {
        let board = Board::new(BTreeMap::from([(1, 40)]), BTreeMap::from([(24, 5)]), 90).unwrap();
        let mut p = player(PlayerKind::Standard);
        let turn = p
            .take_turn(&board, &mut ScriptedRolls::new([1]))
            .unwrap();
        assert_eq!(
            turn,
            Turn::Moved {
                roll: 1,
                from: 0,
                candidate: 1,
                to: 40
            }
        );
        assert_eq!(p.position(), 40);
        assert_eq!(p.steps(), 1);
    }

    #[test]
    fn standard_move_with_ladders_everywhere() {
        let board = Board::new(
            BTreeMap::from([(1, 30), (2, 31), (3, 32), (4, 33), (5, 34), (6, 35)]),
            BTreeMap::from([(40, 12), (41, 11), (42, 10), (43, 9)]),
            90,
        )
        .unwrap();
        let mut die = Die::seeded(11);
        for _ in 0..50 {
            let mut p = player(PlayerKind::Standard);
            p.take_turn(&board, &mut die).unwrap();
            assert!(p.position() >= 30);
            assert!(board.shortcut_at(p.position()).is_none());
        }
    }

    #[test]
    fn standard_moves_by_roll_then_resolves_chutes() {
        let board = sample_board();
        let mut p = player(PlayerKind::Standard).with_position(20);
        p.take_turn(&board, &mut ScriptedRolls::new([4])).unwrap();
        assert_eq!(p.position(), 5);
        p.take_turn(&board, &mut ScriptedRolls::new([6])).unwrap();
        assert_eq!(p.position(), 11);
        assert_eq!(p.steps(), 2);
    }

    #[test]
    fn standard_never_rests_on_shortcut_source() {
        let board = Board::default();
        let mut die = Die::seeded(99);
        let mut p = player(PlayerKind::Standard);
        while !board.goal_reached(p.position()) {
            let before = p.position();
            match p.take_turn(&board, &mut die).unwrap() {
                Turn::Moved {
                    roll, candidate, ..
                } => {
                    assert_eq!(candidate, before + u32::from(roll));
                    assert!((1..=6).contains(&(candidate - before)));
                }
                Turn::Skipped { .. } => panic!("standard players never skip"),
            }
            assert!(board.shortcut_at(p.position()).is_none());
        }
    }

    #[test]
    fn resilient_bonus_applies_on_chute_destination() {
        let board = sample_board();
        let mut p = player(PlayerKind::Resilient).with_position(5);
        let turn = p.take_turn(&board, &mut ScriptedRolls::new([2])).unwrap();
        assert_eq!(
            turn,
            Turn::Moved {
                roll: 2,
                from: 5,
                candidate: 8,
                to: 10
            }
        );
        assert_eq!(p.steps(), 1);
    }

    #[test]
    fn resilient_ignores_ladder_destinations() {
        let board = sample_board();
        let mut p = player(PlayerKind::Resilient).with_position(40);
        p.take_turn(&board, &mut ScriptedRolls::new([3])).unwrap();
        assert_eq!(p.position(), 43);
    }

    #[test]
    fn resilient_uses_configured_extra_steps() {
        let board = sample_board();
        let tuning = VariantTuning {
            resilient_extra_steps: 4,
            ..VariantTuning::default()
        };
        let mut p = PlayerState::new(Movement::for_kind(PlayerKind::Resilient, &tuning))
            .with_position(3);
        p.take_turn(&board, &mut ScriptedRolls::new([1])).unwrap();
        assert_eq!(p.position(), 10);
    }

    #[test]
    fn lazy_penalty_applies_on_ladder_destination() {
        let board = sample_board();
        let mut p = player(PlayerKind::Lazy).with_position(40);
        p.take_turn(&board, &mut ScriptedRolls::new([5])).unwrap();
        assert_eq!(p.position(), 44);
        assert_eq!(p.steps(), 1);
    }

    #[test]
    fn lazy_turn_voided_when_roll_below_penalty() {
        let board = sample_board();
        let tuning = VariantTuning {
            lazy_dropped_steps: 3,
            ..VariantTuning::default()
        };
        let mut p =
            PlayerState::new(Movement::for_kind(PlayerKind::Lazy, &tuning)).with_position(10);
        let turn = p.take_turn(&board, &mut ScriptedRolls::new([2])).unwrap();
        assert_eq!(turn, Turn::Skipped { roll: 2 });
        assert!(turn.is_skipped());
        assert_eq!(p.position(), 10);
        assert_eq!(p.steps(), 0);

        let turn = p.take_turn(&board, &mut ScriptedRolls::new([3])).unwrap();
        assert_eq!(turn.roll(), 3);
        assert_eq!(p.position(), 10);
        assert_eq!(p.steps(), 1);
    }

    #[test]
    fn lazy_ignores_chute_destinations() {
        let board = sample_board();
        let mut p = player(PlayerKind::Lazy).with_position(5);
        p.take_turn(&board, &mut ScriptedRolls::new([1])).unwrap();
        assert_eq!(p.position(), 6);
    }

    #[test]
    fn invalid_roll_is_rejected() {
        let board = sample_board();
        let mut p = player(PlayerKind::Standard);
        let err = p
            .take_turn(&board, &mut ScriptedRolls::new([7]))
            .unwrap_err();
        assert_eq!(err, GameError::InvalidRoll { roll: 7, faces: 6 });
        let err = p
            .take_turn(&board, &mut ScriptedRolls::new([0]))
            .unwrap_err();
        assert_eq!(err, GameError::InvalidRoll { roll: 0, faces: 6 });
        assert_eq!(p.position(), 0);
        assert_eq!(p.steps(), 0);
    }

    #[test]
    fn kind_parses_keys_and_labels() {
        assert_eq!("standard".parse::<PlayerKind>().unwrap(), PlayerKind::Standard);
        assert_eq!("Player".parse::<PlayerKind>().unwrap(), PlayerKind::Standard);
        assert_eq!(" LAZY ".parse::<PlayerKind>().unwrap(), PlayerKind::Lazy);
        assert_eq!(
            "resilientplayer".parse::<PlayerKind>().unwrap(),
            PlayerKind::Resilient
        );
        assert!(matches!(
            "sneaky".parse::<PlayerKind>(),
            Err(ConfigError::UnknownPlayerKind(token)) if token == "sneaky"
        ));
    }

    #[test]
    fn kind_serde_uses_keys_and_accepts_labels() {
        assert_eq!(
            serde_json::to_string(&PlayerKind::Resilient).unwrap(),
            "\"resilient\""
        );
        let kinds: Vec<PlayerKind> =
            serde_json::from_str(r#"["standard", "LazyPlayer", "Player"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![PlayerKind::Standard, PlayerKind::Lazy, PlayerKind::Standard]
        );
    }

    #[test]
    fn tuning_rejects_unescapable_penalty() {
        let tuning = VariantTuning {
            lazy_dropped_steps: 6,
            ..VariantTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::DroppedStepsTooLarge { value: 6, max: 5 })
        ));
        assert!(VariantTuning::default().validate().is_ok());
    }
}
