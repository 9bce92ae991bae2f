use anyhow::{Context, Result};
use clap::Parser;
use isobot::tournament::{run_tournament, TournamentConfig};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Round-robin tournament between Isolation agents", long_about = None)]
struct Args {
    /// JSON tournament config; built-in roster when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fair pairs per test/CPU agent pairing
    #[arg(long)]
    matches: Option<usize>,

    /// Per-move time limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    #[arg(long)]
    threads: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Also write the report as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,

    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TournamentConfig::from_json_file(path)?,
        None => TournamentConfig::default(),
    };
    if let Some(m) = args.matches { config.matches = m; }
    if let Some(t) = args.time_limit_ms { config.time_limit_ms = t; }
    if let Some(t) = args.threads { config.threads = t; }
    if let Some(s) = args.seed { config.seed = s; }
    if args.no_progress { config.progress = false; }

    let report = run_tournament(&config)?;
    println!("{report}");

    if let Some(path) = &args.json_out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        info!("report written to {}", path.display());
    }
    Ok(())
}
