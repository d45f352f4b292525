use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use time::{Date, OffsetDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tactus_domain::{age_between, InputEvent, Modality, Pattern, TrainingConfig};
use tactus_engine::{InputOutcome, Session};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replay a recorded input log through the timing engine"
)]
struct Args {
    /// Session configuration (YAML)
    config: PathBuf,
    /// Recorded input log (JSON array of input events)
    inputs: PathBuf,
    /// Grade against this age instead of the configured birth date
    #[arg(long)]
    age: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ReplayConfig {
    modality: Modality,
    bpm: u32,
    duration_seconds: u32,
    pattern: Pattern,
    birth_date: Option<Date>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let file = File::open(&args.config)
        .with_context(|| format!("opening config {}", args.config.display()))?;
    let replay: ReplayConfig = serde_yaml::from_reader(BufReader::new(file))?;
    let config = TrainingConfig::new(
        replay.modality,
        replay.bpm,
        replay.duration_seconds,
        replay.pattern.clone(),
    )?;

    let file = File::open(&args.inputs)
        .with_context(|| format!("opening input log {}", args.inputs.display()))?;
    let mut events: Vec<InputEvent> = serde_json::from_reader(BufReader::new(file))?;
    events.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    info!(count = events.len(), "loaded input log");

    let mut session = Session::new(config)?;
    let interval_ms = session.config().interval_ms();
    let total_beats = session.config().total_beats();

    // Each beat's window closes one interval after it was due, mirroring the
    // live presentation timer.
    let mut next_expiry = 0usize;
    let mut matched = 0usize;
    let mut discarded = 0usize;
    for event in events {
        while next_expiry < total_beats
            && (next_expiry as f64 + 1.0) * interval_ms <= event.timestamp
        {
            session.expire_beat(next_expiry);
            next_expiry += 1;
        }
        match session.handle_input(event) {
            InputOutcome::Matched { .. } => matched += 1,
            InputOutcome::Discarded => discarded += 1,
        }
    }
    session.finalize();
    info!(matched, discarded, "replay complete");

    let age = args.age.or_else(|| {
        replay
            .birth_date
            .map(|birth| age_between(birth, OffsetDateTime::now_utc().date()))
    });
    let summary = session.summarize(age);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
