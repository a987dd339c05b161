use std::path::PathBuf;

use clap::Parser;
use solar_shuttle::config::{PlannerConfig, load_planner_config};
use solar_shuttle::export::{self, epoch::Epoch};
use solar_shuttle::feed;
use solar_shuttle::primitives::time::split_days;
use solar_shuttle::primitives::units::au_per_day_to_km_s;
use solar_shuttle::transfer::ScheduleTimeline;

/// Plan shuttle round trips and export their time points.
#[derive(Parser, Debug)]
#[command(author, version, about = "Mission schedule planner (half-ellipse transfers)")]
struct Cli {
    /// Planner configuration (YAML, or TOML by extension); built-in Earth–Mars scenario when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plan missions until this simulated day is covered
    #[arg(long, default_value_t = 3_000.0)]
    through: f64,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/schedule.csv")]
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
    feed::plan_through(&mut timeline, cli.through)?;
    let records = feed::schedule_records(&timeline, &epoch);

    let writer = export::writer_for_path(&cli.output)?;
    export::schedule::write_csv(writer, &records)?;
    if cli.output.as_os_str() == "-" {
        return Ok(());
    }

    let generator = timeline.generator();
    let model = generator.model();
    let system = generator.system();
    println!(
        "=== {} <-> {} schedule ({} missions) ===",
        config.source.name,
        config.target.name,
        timeline.len()
    );
    for (schedule, record) in timeline.schedules().iter().zip(&records) {
        let (d_out, h_out, m_out) = split_days(schedule.outbound.duration());
        let (d_ret, h_ret, m_ret) = split_days(schedule.inbound.duration());
        let dv_out = model
            .velocity(&system.source, schedule.t_launch)
            .map(|v| au_per_day_to_km_s(schedule.outbound.departure_delta_v(&v)))?;
        let dv_ret = model
            .velocity(&system.target, schedule.t_depart_return)
            .map(|v| au_per_day_to_km_s(schedule.inbound.departure_delta_v(&v)))?;
        println!("Mission {}", schedule.mission_index);
        println!(
            "  Launch         : day {:.3} ({})",
            schedule.t_launch, record.launch_utc
        );
        println!(
            "  Outbound       : {}d {}h {}m, departure Δv ≈ {:.3} km/s",
            d_out, h_out, m_out, dv_out
        );
        println!(
            "  Target stay    : day {:.3} -> {:.3}",
            schedule.t_arrival_outbound, schedule.t_depart_return
        );
        println!(
            "  Return         : {}d {}h {}m, departure Δv ≈ {:.3} km/s",
            d_ret, h_ret, m_ret, dv_ret
        );
        println!(
            "  Home           : day {:.3} ({})",
            schedule.t_arrival_return, record.arrival_return_utc
        );
    }
    println!("Schedule CSV written to {}", cli.output.display());
    Ok(())
}
