use anyhow::Result;
use chutes_game::{KindSummary, SimulationSummary};
use colored::Colorize;
use std::io::Write;

use crate::runner::SeedRun;
use crate::util::{optional_stat, percent};

pub fn generate_console_report(out: &mut dyn Write, runs: &[SeedRun]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    for run in runs {
        let summary = &run.summary;
        writeln!(out)?;
        writeln!(
            out,
            "{} {}",
            "Seed".bold(),
            run.input.to_string().bright_yellow()
        )?;
        writeln!(out, "Games played: {}", summary.games)?;
        writeln!(out, "Lineup: {}", lineup_labels(summary))?;
        if let Some(durations) = &summary.durations {
            writeln!(
                out,
                "Game length: mean {:.2}, median {:.1}, range {}-{}",
                durations.mean, durations.median, durations.min, durations.max
            )?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "   {:<16} {:>5} {:>6} {:>8} {:>10} {:>8} {:>8}",
            "Kind", "Seats", "Wins", "Share", "Per seat", "Mean", "Median"
        )?;
        for kind in &summary.per_kind {
            let marker = if is_leader(summary, kind) {
                "🏆".to_string()
            } else {
                "  ".to_string()
            };
            writeln!(
                out,
                "{marker} {:<16} {:>5} {:>6} {:>8} {:>10} {:>8} {:>8}",
                kind.kind.label(),
                kind.participants,
                kind.wins,
                percent(kind.win_share),
                percent(kind.wins_per_participant),
                optional_stat(kind.durations.as_ref().map(|d| d.mean)),
                optional_stat(kind.durations.as_ref().map(|d| d.median)),
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, runs: &[SeedRun]) -> Result<()> {
    let payload: Vec<&SimulationSummary> = runs.iter().map(|run| &run.summary).collect();
    serde_json::to_writer_pretty(&mut *out, &payload)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, runs: &[SeedRun]) -> Result<()> {
    writeln!(out, "# Chutes & Ladders Simulation Results\n")?;

    for run in runs {
        let summary = &run.summary;
        writeln!(out, "## Seed {}\n", run.input)?;
        writeln!(out, "- **Games**: {}", summary.games)?;
        writeln!(out, "- **Lineup**: {}", lineup_labels(summary))?;
        if let Some(durations) = &summary.durations {
            writeln!(
                out,
                "- **Game length**: mean {:.2}, median {:.1}, std {:.2}, range {}-{}",
                durations.mean, durations.median, durations.std_dev, durations.min, durations.max
            )?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "| Kind | Seats | Wins | Win share | Wins per seat | Mean steps | Median steps |"
        )?;
        writeln!(out, "|---|---:|---:|---:|---:|---:|---:|")?;
        for kind in &summary.per_kind {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} |",
                kind.kind.label(),
                kind.participants,
                kind.wins,
                percent(kind.win_share),
                percent(kind.wins_per_participant),
                optional_stat(kind.durations.as_ref().map(|d| d.mean)),
                optional_stat(kind.durations.as_ref().map(|d| d.median)),
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, runs: &[SeedRun]) -> Result<()> {
    writeln!(
        out,
        "seed,kind,participants,wins,win_share,wins_per_participant,mean_steps,median_steps,min_steps,max_steps,std_steps"
    )?;
    for run in runs {
        for kind in &run.summary.per_kind {
            let durations = kind.durations.as_ref();
            writeln!(
                out,
                "{},{},{},{},{:.6},{:.6},{},{},{},{},{}",
                run.input,
                kind.kind.key(),
                kind.participants,
                kind.wins,
                kind.win_share,
                kind.wins_per_participant,
                csv_float(durations.map(|d| d.mean)),
                csv_float(durations.map(|d| d.median)),
                durations.map_or_else(String::new, |d| d.min.to_string()),
                durations.map_or_else(String::new, |d| d.max.to_string()),
                csv_float(durations.map(|d| d.std_dev)),
            )?;
        }
    }
    Ok(())
}

fn csv_float(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.4}"))
}

fn lineup_labels(summary: &SimulationSummary) -> String {
    summary
        .lineup
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_leader(summary: &SimulationSummary, kind: &KindSummary) -> bool {
    kind.wins > 0
        && summary
            .per_kind
            .iter()
            .all(|other| other.wins_per_participant <= kind.wins_per_participant)
}
