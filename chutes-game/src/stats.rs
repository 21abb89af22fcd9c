//! Grouping and summary statistics over completed games.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::GameResult;
use crate::numbers::{ratio, usize_to_f64};
use crate::player::PlayerKind;

/// Count of games won by each player kind.
#[must_use]
pub fn wins_per_kind(results: &[GameResult]) -> BTreeMap<PlayerKind, usize> {
    let mut wins = BTreeMap::new();
    for result in results {
        *wins.entry(result.winner).or_insert(0) += 1;
    }
    wins
}

/// Winning step counts per player kind, in completion order.
#[must_use]
pub fn durations_per_kind(results: &[GameResult]) -> BTreeMap<PlayerKind, Vec<u32>> {
    let mut durations: BTreeMap<PlayerKind, Vec<u32>> = BTreeMap::new();
    for result in results {
        durations
            .entry(result.winner)
            .or_default()
            .push(result.steps);
    }
    durations
}

/// Number of seats each player kind occupies in the lineup.
#[must_use]
pub fn participants_per_kind(lineup: &[PlayerKind]) -> BTreeMap<PlayerKind, usize> {
    let mut participants = BTreeMap::new();
    for &kind in lineup {
        *participants.entry(kind).or_insert(0) += 1;
    }
    participants
}

/// Distribution of game lengths in winner steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub samples: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

impl DurationStats {
    /// `None` when there are no samples.
    #[must_use]
    pub fn from_steps(steps: &[u32]) -> Option<Self> {
        let min = *steps.iter().min()?;
        let max = *steps.iter().max()?;
        let count = usize_to_f64(steps.len());
        let mean = steps.iter().map(|&s| f64::from(s)).sum::<f64>() / count;
        let variance = steps
            .iter()
            .map(|&s| (f64::from(s) - mean).powi(2))
            .sum::<f64>()
            / count;

        let mut sorted = steps.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            f64::midpoint(f64::from(sorted[mid - 1]), f64::from(sorted[mid]))
        } else {
            f64::from(sorted[mid])
        };

        Some(Self {
            samples: steps.len(),
            mean,
            median,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Per-kind outcome of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSummary {
    pub kind: PlayerKind,
    pub participants: usize,
    pub wins: usize,
    /// Fraction of all games this kind won.
    pub win_share: f64,
    /// `win_share` divided by the number of seats of this kind.
    pub wins_per_participant: f64,
    pub durations: Option<DurationStats>,
}

/// Report-ready digest of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub seed: Option<u64>,
    pub lineup: Vec<PlayerKind>,
    pub durations: Option<DurationStats>,
    pub per_kind: Vec<KindSummary>,
}

impl SimulationSummary {
    #[must_use]
    pub fn from_results(results: &[GameResult], lineup: &[PlayerKind], seed: Option<u64>) -> Self {
        let games = results.len();
        let wins = wins_per_kind(results);
        let durations = durations_per_kind(results);
        let all_steps: Vec<u32> = results.iter().map(|result| result.steps).collect();

        let per_kind = participants_per_kind(lineup)
            .into_iter()
            .map(|(kind, participants)| {
                let kind_wins = wins.get(&kind).copied().unwrap_or(0);
                let win_share = ratio(kind_wins, games);
                KindSummary {
                    kind,
                    participants,
                    wins: kind_wins,
                    win_share,
                    wins_per_participant: win_share / usize_to_f64(participants),
                    durations: durations
                        .get(&kind)
                        .and_then(|steps| DurationStats::from_steps(steps)),
                }
            })
            .collect();

        Self {
            games,
            seed,
            lineup: lineup.to_vec(),
            durations: DurationStats::from_steps(&all_steps),
            per_kind,
        }
    }

    #[must_use]
    pub fn kind(&self, kind: PlayerKind) -> Option<&KindSummary> {
        self.per_kind.iter().find(|summary| summary.kind == kind)
    }
}
