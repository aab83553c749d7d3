//! Headless match runner.
//!
//! Usage:
//!   stickfight --transcript transcript.json [--config match.json] [--history history.json]
//!              [--snapshots snapshots.jsonl] [--log-level debug]

mod config;
mod error;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use stickfight_core::{
    hash_record, hash_transcript, FrameInput, MatchHistory, MatchRecord, MatchRecorder,
    Simulation, NULL_INPUT,
};

use config::HostConfig;

/// Two-player stick-figure fighting simulation, run headless from a key transcript
#[derive(Parser, Debug)]
#[command(name = "stickfight")]
#[command(version)]
struct Args {
    /// JSON match config (defaults apply when omitted)
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// JSON key transcript: one `[p1_keys, p2_keys]` entry per tick
    #[arg(long, value_name = "TRANSCRIPT_FILE")]
    transcript: PathBuf,

    /// Match history file to append the result to
    #[arg(long, value_name = "HISTORY_FILE")]
    history: Option<PathBuf>,

    /// Write one JSON snapshot per tick to this file
    #[arg(long, value_name = "SNAPSHOT_FILE")]
    snapshots: Option<PathBuf>,

    /// Log filter, e.g. "info" or "stickfight_core=debug" (RUST_LOG wins when set)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct RunReport<'a> {
    record: &'a MatchRecord,
    ticks_played: usize,
    transcript_hash: String,
    record_hash: String,
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_history(path: &Path) -> Result<MatchHistory> {
    if !path.exists() {
        return Ok(MatchHistory::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse history {}", path.display()))
}

fn save_history(path: &Path, history: &MatchHistory) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write history {}", path.display()))
}

/// Steps the simulation until the round ends. A transcript that runs out
/// early is padded with empty input; the round clock guarantees an end.
fn run_match(
    sim: &mut Simulation,
    frames: &[[FrameInput; 2]],
    mut snapshots: Option<&mut BufWriter<File>>,
) -> Result<(MatchRecord, Vec<[FrameInput; 2]>)> {
    let mut consumed = Vec::with_capacity(frames.len());
    let mut tick = 0usize;
    loop {
        let inputs = frames.get(tick).copied().unwrap_or([NULL_INPUT; 2]);
        if tick == frames.len() {
            warn!(tick, "transcript exhausted, padding with empty input");
        }
        let out = sim.step(&inputs);
        consumed.push(inputs);
        tick += 1;

        if let Some(writer) = snapshots.as_deref_mut() {
            serde_json::to_writer(&mut *writer, &sim.snapshot())?;
            writeln!(writer)?;
        }
        if let Some(record) = out.record {
            if tick < frames.len() {
                info!(
                    unused = frames.len() - tick,
                    "round ended before the transcript did"
                );
            }
            return Ok((record, consumed));
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let host_config = match &args.config {
        Some(path) => HostConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => HostConfig::default(),
    };
    let bindings = host_config.player_bindings()?;
    let started_at = chrono::Utc::now().timestamp();
    let match_config = host_config.to_match_config(started_at)?;

    let keys = config::load_transcript(&args.transcript)
        .with_context(|| format!("Failed to load transcript {}", args.transcript.display()))?;
    let frames = config::resolve_transcript(&keys, &bindings)?;
    info!(
        level = match_config.level.name(),
        p1 = %match_config.names[0],
        p2 = %match_config.names[1],
        ticks = frames.len(),
        "starting match"
    );

    let mut snapshot_writer = match &args.snapshots {
        Some(path) => Some(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create snapshot file {}", path.display())
        })?)),
        None => None,
    };

    let mut sim = Simulation::new(match_config);
    let (record, consumed) = run_match(&mut sim, &frames, snapshot_writer.as_mut())?;
    if let Some(writer) = snapshot_writer.as_mut() {
        writer.flush()?;
    }

    let report = RunReport {
        record: &record,
        ticks_played: consumed.len(),
        transcript_hash: hex::encode(hash_transcript(&consumed)),
        record_hash: hex::encode(hash_record(&record)),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    let history_path = args.history.or(host_config.history_path);
    if let Some(path) = history_path {
        let mut history = load_history(&path)?;
        history.record(record.clone());
        save_history(&path, &history)?;
        info!(path = %path.display(), matches = history.matches.len(), "history updated");

        println!("Leaderboard:");
        for (rank, (name, wins)) in history.leaderboard().iter().enumerate() {
            println!("  {}. {} ({} wins)", rank + 1, name, wins);
        }
    }

    Ok(())
}
