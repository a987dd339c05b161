use std::path::PathBuf;

use clap::Parser;
use solar_shuttle::config::{PlannerConfig, load_planner_config};
use solar_shuttle::export::{self, epoch::Epoch, feed::Metadata};
use solar_shuttle::feed;
use solar_shuttle::transfer::ScheduleTimeline;

/// Sample the ship position over a time range for rendering.
#[derive(Parser, Debug)]
#[command(author, version, about = "Shuttle position feed (CSV + JSON schedule sidecar)")]
struct Cli {
    /// Planner configuration (YAML, or TOML by extension); built-in Earth–Mars scenario when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// First sampled simulated day
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last sampled simulated day (inclusive)
    #[arg(long)]
    to: f64,

    /// Sample spacing in days
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Output CSV file (use '-' for stdout; no sidecar is written then)
    #[arg(long, default_value = "artifacts/feed.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_planner_config(path)?,
        None => PlannerConfig::default(),
    };
    let epoch = Epoch::parse(&config.epoch_utc)?;

    let mut timeline = ScheduleTimeline::from_config(&config)?;
    let samples = feed::sample_range(&mut timeline, &epoch, cli.from, cli.to, cli.step)?;

    let writer = export::writer_for_path(&cli.output)?;
    export::feed::write_csv(writer, &samples)?;
    if cli.output.as_os_str() == "-" {
        return Ok(());
    }

    let records = feed::schedule_records(&timeline, &epoch);
    let meta = Metadata {
        source: &config.source.name,
        target: &config.target.name,
        epoch_utc: &config.epoch_utc,
    };
    let sidecar = export::feed::write_sidecar(&cli.output, &meta, &samples, &records)?;
    println!(
        "Wrote {} samples to {} ({} missions described in {})",
        samples.len(),
        cli.output.display(),
        records.len(),
        sidecar.display()
    );
    Ok(())
}
