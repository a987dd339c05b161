use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use solar_shuttle::config::{PlannerConfig, load_planner_config};
use solar_shuttle::orbits::{Body, ElementModel};
use solar_shuttle::transfer::BodySystem;
use solar_shuttle::transfer::bodies::model_from_config;
use std::fs;
use std::path::{Path, PathBuf};

/// Points per body orbit ring.
const ORBIT_RING_POINTS: usize = 360;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render the ship path from a position feed CSV over the body orbits"
)]
struct Cli {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "artifacts/trajectory.png")]
    output: PathBuf,
    /// Planner configuration used for the orbit rings; built-in scenario when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 900)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Debug, Clone)]
struct FeedPoint {
    x: f64,
    y: f64,
    phase: String,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_planner_config(path)?,
        None => PlannerConfig::default(),
    };
    let points = read_points(&cli.input)?;
    if points.is_empty() {
        return Err(anyhow::anyhow!("No samples in the provided feed CSV"));
    }

    let system = BodySystem::from_config(&config);
    let model = model_from_config(&config.solver);
    let source_ring = orbit_ring(&model, &system.source)?;
    let target_ring = orbit_ring(&model, &system.target)?;

    let extent = points
        .iter()
        .map(|p| (p.x, p.y))
        .chain(source_ring.iter().copied())
        .chain(target_ring.iter().copied())
        .fold(0.0_f64, |acc, (x, y)| acc.max(x.abs()).max(y.abs()))
        * 1.1;
    if !(extent.is_finite() && extent > 0.0) {
        return Err(anyhow::anyhow!("Feed coordinates are degenerate"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    for (ring, color) in [
        (&source_ring, RGBColor(70, 110, 200)),
        (&target_ring, RGBColor(200, 90, 60)),
    ] {
        chart.draw_series(std::iter::once(PathElement::new(
            ring.clone(),
            ShapeStyle::from(&color.mix(0.6)).stroke_width(1),
        )))?;
    }
    chart.draw_series(std::iter::once(Circle::new(
        (0.0, 0.0),
        6,
        RGBColor(250, 210, 60).filled(),
    )))?;

    for segment in points.windows(2) {
        let (a, b) = (&segment[0], &segment[1]);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(a.x, a.y), (b.x, b.y)],
            ShapeStyle::from(&phase_color(&a.phase)).stroke_width(2),
        )))?;
    }
    if let Some(last) = points.last() {
        chart.draw_series(std::iter::once(Circle::new(
            (last.x, last.y),
            4,
            WHITE.filled(),
        )))?;
    }

    root.present()?;
    log::info!(
        "rendered {} feed samples to {}",
        points.len(),
        cli.output.display()
    );
    Ok(())
}

fn read_points(path: &Path) -> anyhow::Result<Vec<FeedPoint>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let x_idx = column("x_au")?;
    let y_idx = column("y_au")?;
    let phase_idx = column("phase")?;

    let mut points = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let x: f64 = r.get(x_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let y: f64 = r.get(y_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if x.is_finite() && y.is_finite() {
            points.push(FeedPoint {
                x,
                y,
                phase: r.get(phase_idx).unwrap_or("").to_string(),
            });
        }
    }
    Ok(points)
}

fn orbit_ring(model: &ElementModel, body: &Body) -> anyhow::Result<Vec<(f64, f64)>> {
    let period = body.elements.period;
    (0..=ORBIT_RING_POINTS)
        .map(|i| -> anyhow::Result<(f64, f64)> {
            let t = body.elements.epoch + period * i as f64 / ORBIT_RING_POINTS as f64;
            let p = model.position(body, t)?;
            Ok((p[0], p[1]))
        })
        .collect()
}

fn phase_color(phase: &str) -> RGBColor {
    match phase {
        "source_parking" => RGBColor(120, 170, 255),
        "outbound_transfer" => RGBColor(120, 230, 120),
        "target_parking" => RGBColor(255, 140, 100),
        "return_transfer" => RGBColor(230, 200, 90),
        _ => RGBColor(200, 200, 200),
    }
}
