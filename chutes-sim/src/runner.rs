use anyhow::{Context, Result, bail};
use chutes_game::{PlayerKind, Simulation, SimulationConfig, SimulationSummary};
use colored::Colorize;
use log::debug;
use std::path::Path;

use crate::seeds::SeedInput;

/// Lineup used when neither `--players` nor a config file names one.
pub const DEFAULT_PLAYERS: [PlayerKind; 6] = [
    PlayerKind::Standard,
    PlayerKind::Standard,
    PlayerKind::Standard,
    PlayerKind::Lazy,
    PlayerKind::Lazy,
    PlayerKind::Resilient,
];

/// Command-line values that take precedence over a config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub players: Option<Vec<PlayerKind>>,
    pub no_shuffle: bool,
    pub goal: Option<u32>,
    pub extra_steps: Option<u32>,
    pub dropped_steps: Option<u32>,
    pub max_rounds: Option<u32>,
}

/// One finished simulation for a single seed.
#[derive(Debug, Clone)]
pub struct SeedRun {
    pub input: SeedInput,
    pub summary: SimulationSummary,
}

pub fn parse_players(tokens: &[String]) -> Result<Vec<PlayerKind>> {
    if tokens.is_empty() {
        bail!("--players needs at least one player kind");
    }
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<PlayerKind>()
                .with_context(|| format!("invalid --players entry {token:?}"))
        })
        .collect()
}

/// Read the JSON config at `path`, or start from the runner defaults.
pub fn load_base_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::new(DEFAULT_PLAYERS.to_vec()));
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SimulationConfig::from_json(&json)
        .with_context(|| format!("invalid simulation config {}", path.display()))
}

#[must_use]
pub fn apply_overrides(mut config: SimulationConfig, overrides: &Overrides) -> SimulationConfig {
    if let Some(players) = &overrides.players {
        config.players.clone_from(players);
    }
    if overrides.no_shuffle {
        config.shuffle_players = false;
    }
    if let Some(goal) = overrides.goal {
        config.board.goal = goal;
    }
    if let Some(extra) = overrides.extra_steps {
        config.tuning.resilient_extra_steps = extra;
    }
    if let Some(dropped) = overrides.dropped_steps {
        config.tuning.lazy_dropped_steps = dropped;
    }
    if overrides.max_rounds.is_some() {
        config.max_rounds = overrides.max_rounds;
    }
    config
}

/// Run `games` games for every seed, each on its own simulation.
pub fn run_seeds(
    base: &SimulationConfig,
    seeds: &[SeedInput],
    games: usize,
    verbose: bool,
) -> Result<Vec<SeedRun>> {
    base.validate().context("invalid simulation config")?;

    let mut runs = Vec::with_capacity(seeds.len());
    for &input in seeds {
        let config = base.clone().with_seed(input.seed());
        let mut simulation = Simulation::new(&config)
            .with_context(|| format!("failed to set up simulation for seed {input}"))?;
        if verbose {
            let lineup: Vec<String> = simulation
                .lineup()
                .iter()
                .map(ToString::to_string)
                .collect();
            eprintln!(
                "🎲 seed {} - {} games, lineup [{}]",
                input.to_string().cyan(),
                games,
                lineup.join(", ")
            );
        }
        simulation
            .run(games)
            .with_context(|| format!("simulation failed for seed {input}"))?;
        debug!("seed {input}: wins {:?}", simulation.wins_per_kind());
        runs.push(SeedRun {
            input,
            summary: simulation.summary(),
        });
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(label: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "chutes-runner-{label}-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_keys_and_labels() {
        let players = parse_players(&[
            "standard".to_string(),
            "LazyPlayer".to_string(),
            "Resilient".to_string(),
        ])
        .unwrap();
        assert_eq!(
            players,
            vec![PlayerKind::Standard, PlayerKind::Lazy, PlayerKind::Resilient]
        );
        assert!(parse_players(&["wizard".to_string()]).is_err());
        assert!(parse_players(&[]).is_err());
    }

    #[test]
    fn defaults_without_config_file() {
        let config = load_base_config(None).unwrap();
        assert_eq!(config.players, DEFAULT_PLAYERS.to_vec());
        assert!(config.shuffle_players);
        assert_eq!(config.board.goal, 90);
    }

    #[test]
    fn flags_override_config_file() {
        let path = temp_config(
            "override",
            r#"{"players": ["lazy"], "shuffle_players": true, "tuning": {"lazy_dropped_steps": 2}}"#,
        );
        let base = load_base_config(Some(&path)).unwrap();
        assert_eq!(base.players, vec![PlayerKind::Lazy]);

        let overrides = Overrides {
            players: Some(vec![PlayerKind::Standard, PlayerKind::Resilient]),
            no_shuffle: true,
            goal: Some(95),
            extra_steps: Some(3),
            dropped_steps: None,
            max_rounds: Some(400),
        };
        let config = apply_overrides(base, &overrides);
        assert_eq!(config.players, vec![PlayerKind::Standard, PlayerKind::Resilient]);
        assert!(!config.shuffle_players);
        assert_eq!(config.board.goal, 95);
        assert_eq!(config.tuning.resilient_extra_steps, 3);
        assert_eq!(config.tuning.lazy_dropped_steps, 2);
        assert_eq!(config.max_rounds, Some(400));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_and_invalid_config_files_error() {
        let missing = std::env::temp_dir().join("chutes-runner-does-not-exist.json");
        let err = load_base_config(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));

        let path = temp_config("invalid", r#"{"players": []}"#);
        let err = load_base_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("player lineup is empty"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn runs_one_simulation_per_seed() {
        let base = load_base_config(None).unwrap();
        let seeds = [SeedInput::Fixed(1), SeedInput::Fixed(2)];
        let runs = run_seeds(&base, &seeds, 20, false).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].summary.seed, Some(1));
        assert_eq!(runs[1].summary.seed, Some(2));
        assert!(runs.iter().all(|run| run.summary.games == 20));
    }

    #[test]
    fn invalid_overrides_fail_before_running() {
        let base = apply_overrides(
            load_base_config(None).unwrap(),
            &Overrides {
                dropped_steps: Some(6),
                ..Overrides::default()
            },
        );
        let err = run_seeds(&base, &[SeedInput::Fixed(1)], 5, false).unwrap_err();
        assert!(format!("{err:#}").contains("lazy_dropped_steps"));
    }
}
