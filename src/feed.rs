//! Turns a schedule timeline into export rows.

use shuttle_export::epoch::Epoch;
use shuttle_export::feed::Sample;
use shuttle_export::schedule::Record;
use shuttle_transfer::{PlanningError, ScheduleTimeline, ScheduleTimes};

/// Upper bound on samples produced by one [`sample_range`] call.
pub const MAX_SAMPLES: usize = 1_000_000;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("sample step must be positive (got {0})")]
    InvalidStep(f64),
    #[error("range end {to} precedes start {from}")]
    EmptyRange { from: f64, to: f64 },
    #[error("range would produce {count} samples (limit {limit})")]
    TooManySamples { count: usize, limit: usize },
    #[error(transparent)]
    Planning(#[from] PlanningError),
}

pub fn schedule_record(epoch: &Epoch, times: &ScheduleTimes) -> Record {
    Record::new(
        epoch,
        times.mission_index,
        [
            times.t_start,
            times.t_launch,
            times.t_arrival_outbound,
            times.t_depart_return,
            times.t_arrival_return,
        ],
    )
}

/// Schedule rows for every mission planned so far.
pub fn schedule_records(timeline: &ScheduleTimeline, epoch: &Epoch) -> Vec<Record> {
    timeline
        .time_points()
        .map(|times| schedule_record(epoch, &times))
        .collect()
}

/// Plan missions until the timeline covers `through`.
pub fn plan_through(timeline: &mut ScheduleTimeline, through: f64) -> Result<(), PlanningError> {
    timeline.ensure_covered(through)?;
    Ok(())
}

/// Ship positions at `from, from + step, ...` up to and including `to`.
///
/// Sample times are computed as `from + i * step` so long ranges do not drift.
pub fn sample_range(
    timeline: &mut ScheduleTimeline,
    epoch: &Epoch,
    from: f64,
    to: f64,
    step: f64,
) -> Result<Vec<Sample>, FeedError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(FeedError::InvalidStep(step));
    }
    if !(to >= from) {
        return Err(FeedError::EmptyRange { from, to });
    }
    let span = ((to - from) / step).floor();
    if !(span < MAX_SAMPLES as f64) {
        return Err(FeedError::TooManySamples {
            count: span as usize + 1,
            limit: MAX_SAMPLES,
        });
    }
    let count = span as usize + 1;

    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let t = from + i as f64 * step;
        let fix = timeline.sample(t)?;
        samples.push(Sample {
            time: t,
            utc: epoch.label(t),
            x_au: fix.position[0],
            y_au: fix.position[1],
            z_au: fix.position[2],
            phase: fix.phase.as_str().to_string(),
            mission_index: fix.times.mission_index,
        });
    }
    log::debug!(
        "sampled {} positions over [{from:.3}, {to:.3}] across {} missions",
        samples.len(),
        timeline.len()
    );
    Ok(samples)
}
