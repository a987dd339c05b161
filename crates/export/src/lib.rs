//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid epoch `{0}` (expected %Y-%m-%dT%H:%M:%S)")]
    Epoch(String),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Calendar labels for simulated days.
pub mod epoch {
    use chrono::{NaiveDateTime, TimeDelta};

    use super::ExportError;

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    /// Maps simulated days onto calendar time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Epoch {
        day_zero: NaiveDateTime,
    }

    impl Epoch {
        pub fn parse(label: &str) -> Result<Self, ExportError> {
            NaiveDateTime::parse_from_str(label, FORMAT)
                .map(|day_zero| Self { day_zero })
                .map_err(|_| ExportError::Epoch(label.to_string()))
        }

        /// UTC label of simulated day `days`, to the nearest second.
        pub fn label(&self, days: f64) -> String {
            let seconds = (days * 86_400.0).round();
            if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
                return "n/a".to_string();
            }
            match TimeDelta::try_seconds(seconds as i64)
                .and_then(|offset| self.day_zero.checked_add_signed(offset))
            {
                Some(at) => at.format(FORMAT).to_string(),
                None => "n/a".to_string(),
            }
        }
    }
}

/// Schedule metadata feed: one row per planned mission.
pub mod schedule {
    use std::io::Write;

    use serde::Serialize;

    use super::ExportError;
    use super::epoch::Epoch;

    /// Time points of one mission, with calendar labels.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record {
        pub mission_index: usize,
        pub t_start: f64,
        pub t_launch: f64,
        pub t_arrival_outbound: f64,
        pub t_depart_return: f64,
        pub t_arrival_return: f64,
        pub launch_utc: String,
        pub arrival_outbound_utc: String,
        pub depart_return_utc: String,
        pub arrival_return_utc: String,
    }

    impl Record {
        /// `times` holds start, launch, outbound arrival, return departure and return arrival.
        pub fn new(epoch: &Epoch, mission_index: usize, times: [f64; 5]) -> Self {
            let [
                t_start,
                t_launch,
                t_arrival_outbound,
                t_depart_return,
                t_arrival_return,
            ] = times;
            Self {
                mission_index,
                t_start,
                t_launch,
                t_arrival_outbound,
                t_depart_return,
                t_arrival_return,
                launch_utc: epoch.label(t_launch),
                arrival_outbound_utc: epoch.label(t_arrival_outbound),
                depart_return_utc: epoch.label(t_depart_return),
                arrival_return_utc: epoch.label(t_arrival_return),
            }
        }
    }

    /// Write all records as CSV with a header row.
    pub fn write_csv<W: Write>(writer: W, records: &[Record]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Position feed samples for external renderers and plots.
pub mod feed {
    use std::fs;
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::ExportError;
    use super::schedule::Record as ScheduleRecord;

    /// One sampled ship position.
    #[derive(Debug, Clone, Serialize)]
    pub struct Sample {
        pub time: f64,
        pub utc: String,
        pub x_au: f64,
        pub y_au: f64,
        pub z_au: f64,
        pub phase: String,
        pub mission_index: usize,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        source: &'a str,
        target: &'a str,
        epoch_utc: &'a str,
        sample_count: usize,
        first_time: Option<f64>,
        last_time: Option<f64>,
        schedules: &'a [ScheduleRecord],
    }

    /// Metadata written next to a feed CSV.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub source: &'a str,
        pub target: &'a str,
        pub epoch_utc: &'a str,
    }

    pub fn write_csv<W: Write>(writer: W, samples: &[Sample]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for sample in samples {
            csv.serialize(sample)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write `<stem>_schedule.json` beside `output` describing the covered missions.
    pub fn write_sidecar(
        output: &Path,
        meta: &Metadata<'_>,
        samples: &[Sample],
        schedules: &[ScheduleRecord],
    ) -> Result<std::path::PathBuf, ExportError> {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("feed");
        let path = parent.join(format!("{stem}_schedule.json"));

        let sidecar = Sidecar {
            source: meta.source,
            target: meta.target,
            epoch_utc: meta.epoch_utc,
            sample_count: samples.len(),
            first_time: samples.first().map(|s| s.time),
            last_time: samples.last().map(|s| s.time),
            schedules,
        };
        to_writer_pretty(fs::File::create(&path)?, &sidecar)?;
        Ok(path)
    }
}
