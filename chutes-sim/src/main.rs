mod reports;
mod runner;
mod seeds;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use runner::{Overrides, SeedRun, apply_overrides, load_base_config, parse_players, run_seeds};
use seeds::{SeedInput, resolve_seed_inputs};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored tables for a terminal
    Console,
    /// Array of simulation summaries
    Json,
    /// Markdown tables, one section per seed
    Markdown,
    /// One row per seed and player kind
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "chutes-sim", version)]
#[command(about = "Batch chutes & ladders simulations comparing player movement variants")]
struct Args {
    /// Games to play per seed
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Player kinds in seating order (comma-separated: standard, resilient, lazy)
    /// [default: standard,standard,standard,lazy,lazy,resilient]
    #[arg(long)]
    players: Option<String>,

    /// Seeds to run (comma-separated integers, or `random` for OS entropy) [default: 1337]
    #[arg(long)]
    seeds: Option<String>,

    /// Keep the configured seating order instead of shuffling it once
    #[arg(long)]
    no_shuffle: bool,

    /// JSON simulation config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Goal square override
    #[arg(long)]
    goal: Option<u32>,

    /// Extra steps for resilient players standing on a chute destination
    #[arg(long)]
    extra_steps: Option<u32>,

    /// Steps lazy players drop when standing on a ladder destination
    #[arg(long)]
    dropped_steps: Option<u32>,

    /// Abort a game that runs longer than this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    announce_banner();

    let start_time = Instant::now();
    let overrides = build_overrides(&args)?;
    let base = load_base_config(args.config.as_deref())?;
    let config = apply_overrides(base, &overrides);
    let seed_inputs = match &args.seeds {
        Some(raw) => resolve_seed_inputs(&split_csv(raw))?,
        // A config file without `--seeds` keeps its own seed, or entropy when absent.
        None if args.config.is_some() => {
            vec![config.seed.map_or(SeedInput::Random, SeedInput::Fixed)]
        }
        None => resolve_seed_inputs(&[])?,
    };

    let runs = run_seeds(&config, &seed_inputs, args.games, args.verbose)?;
    write_reports(&args, &runs)?;

    if args.verbose {
        eprintln!("🏁 Total time: {:?}", start_time.elapsed());
    }
    Ok(())
}

fn announce_banner() {
    eprintln!("{}", "🎲 Chutes & Ladders Simulator".bright_cyan().bold());
    eprintln!("{}", "=============================".cyan());
}

fn build_overrides(args: &Args) -> Result<Overrides> {
    let players = args
        .players
        .as_deref()
        .map(|raw| parse_players(&split_csv(raw)))
        .transpose()?;
    Ok(Overrides {
        players,
        no_shuffle: args.no_shuffle,
        goal: args.goal,
        extra_steps: args.extra_steps,
        dropped_steps: args.dropped_steps,
        max_rounds: args.max_rounds,
    })
}

fn write_reports(args: &Args, runs: &[SeedRun]) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, runs)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, runs)?,
        ReportFormat::Csv => reports::generate_csv_report(&mut output_target, runs)?,
        ReportFormat::Console => reports::generate_console_report(&mut output_target, runs)?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
