use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use solar_shuttle::config::{PlannerConfig, load_planner_config};
use solar_shuttle::impulsive::lambert_solve;
use solar_shuttle::impulsive::transfers::hohmann;
use solar_shuttle::primitives::units::au_per_day_to_km_s;
use solar_shuttle::primitives::vector::{norm, sub};
use solar_shuttle::transfer::BodySystem;
use solar_shuttle::transfer::bodies::model_from_config;

/// Solve the source-to-target boundary value problem between two simulated days.
#[derive(Parser, Debug)]
#[command(author, version, about = "Lambert transfer between the configured bodies")]
struct Cli {
    /// Planner configuration (YAML, or TOML by extension); built-in Earth–Mars scenario when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Departure simulated day
    #[arg(long)]
    depart: f64,

    /// Arrival simulated day
    #[arg(long)]
    arrive: f64,

    /// Take the retrograde branch instead of the prograde one
    #[arg(long, default_value_t = false)]
    long_way: bool,

    /// Print the coplanar circular Hohmann estimate alongside
    #[arg(long, default_value_t = false)]
    estimate_hohmann: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_planner_config(path)?,
        None => PlannerConfig::default(),
    };
    if cli.arrive <= cli.depart {
        return Err(anyhow!("arrival day must be after departure day"));
    }

    let system = BodySystem::from_config(&config);
    let model = model_from_config(&config.solver);
    let departure = model.state(&system.source, cli.depart)?;
    let arrival = model.state(&system.target, cli.arrive)?;
    let tof = cli.arrive - cli.depart;

    let (v1, v2) = lambert_solve(
        departure.position,
        arrival.position,
        tof,
        system.mu,
        !cli.long_way,
    )?;
    let dv_depart = norm(&sub(&v1, &departure.velocity));
    let dv_arrive = norm(&sub(&arrival.velocity, &v2));

    println!("=== Lambert transfer ===");
    println!(
        "{} day {:.3} -> {} day {:.3} (TOF {:.2} days, {})",
        system.source.name,
        cli.depart,
        system.target.name,
        cli.arrive,
        tof,
        if cli.long_way { "retrograde" } else { "prograde" }
    );
    println!(
        "Departure      : v = [{:.6}, {:.6}, {:.6}] AU/day, Δv = {:.3} km/s",
        v1[0],
        v1[1],
        v1[2],
        au_per_day_to_km_s(dv_depart)
    );
    println!(
        "Arrival        : v = [{:.6}, {:.6}, {:.6}] AU/day, Δv = {:.3} km/s",
        v2[0],
        v2[1],
        v2[2],
        au_per_day_to_km_s(dv_arrive)
    );
    println!(
        "Total          : Δv = {:.3} km/s",
        au_per_day_to_km_s(dv_depart + dv_arrive)
    );

    if cli.estimate_hohmann {
        let r1 = norm(&departure.position);
        let r2 = norm(&arrival.position);
        let h = hohmann(r1, r2, system.mu);
        println!(
            "Hohmann est.   : Δv_total = {:.3} km/s (dv1={:.3}, dv2={:.3}), TOF = {:.2} days",
            au_per_day_to_km_s(h.dv_total),
            au_per_day_to_km_s(h.dv1),
            au_per_day_to_km_s(h.dv2),
            h.tof
        );
    }
    Ok(())
}
