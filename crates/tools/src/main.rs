use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use possession_core::config::ViewConfig;
use possession_core::runtime::{ReplayResult, ViewTrace, replay};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the session trace JSON file to replay
    #[arg(short, long)]
    trace: PathBuf,
    /// TOML view settings to replay with instead of the recorded ones
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the trace's events as JSON lines before replaying
    #[arg(long)]
    dump_events: bool,
}

fn load_config_override(path: &Path) -> Result<ViewConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let config: ViewConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    config.validate().with_context(|| format!("Rejected settings: {}", path.display()))?;
    Ok(config)
}

fn load_trace(args: &Args) -> Result<ViewTrace> {
    let mut trace = ViewTrace::load(&args.trace)
        .with_context(|| format!("Failed to load trace file: {}", args.trace.display()))?;
    if let Some(path) = &args.config {
        trace.config = load_config_override(path)?;
        log::info!("replaying with settings from {}", path.display());
    }
    Ok(trace)
}

fn print_report(result: &ReplayResult) {
    println!("Replay complete.");
    println!("Events applied: {}", result.events_applied);
    for command in &result.commands {
        println!("  {command:?}");
    }
    println!("Snapshot Hash: 0x{:016x}", result.snapshot_hash);
}

fn main() -> Result<()> {
    env_logger::Builder::new().filter_level(LevelFilter::Warn).parse_default_env().init();
    let args = Args::parse();

    let trace = load_trace(&args)?;
    if args.dump_events {
        for event in &trace.events {
            println!("{}", serde_json::to_string(event).context("Failed to encode event")?);
        }
    }
    let result = replay(&trace).context("Replay failed during execution")?;
    print_report(&result);
    Ok(())
}
