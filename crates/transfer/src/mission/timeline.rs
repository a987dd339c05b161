//! Append-only arena of mission schedules, extended on demand.

use std::cell::Cell;

use shuttle_config::PlannerConfig;

use super::PlanningError;
use super::sampler::{PositionFix, sample_position};
use super::schedule::{MissionSchedule, MissionScheduleGenerator, ScheduleTimes};

/// Schedules covering simulated time from the generator's start day onward.
///
/// Only whole schedules are ever appended, so readers never see a partial plan.
/// The lookup cursor is a `Cell`, so the timeline is not `Sync`: readers on other
/// threads need it behind a `Mutex` or `RwLock`.
#[derive(Debug)]
pub struct ScheduleTimeline {
    generator: MissionScheduleGenerator,
    schedules: Vec<MissionSchedule>,
    /// Index of the last schedule a lookup resolved to.
    cursor: Cell<usize>,
}

impl ScheduleTimeline {
    pub fn new(generator: MissionScheduleGenerator) -> Self {
        Self {
            generator,
            schedules: Vec::new(),
            cursor: Cell::new(0),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlanningError> {
        Ok(Self::new(MissionScheduleGenerator::from_config(config)?))
    }

    pub fn generator(&self) -> &MissionScheduleGenerator {
        &self.generator
    }

    pub fn start(&self) -> f64 {
        self.generator.settings().start_day
    }

    /// End of the covered range: the last return arrival, or the start day when empty.
    pub fn covered_until(&self) -> f64 {
        self.schedules
            .last()
            .map(|s| s.t_arrival_return)
            .unwrap_or_else(|| self.start())
    }

    pub fn schedules(&self) -> &[MissionSchedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Schedule metadata feed.
    pub fn time_points(&self) -> impl Iterator<Item = ScheduleTimes> + '_ {
        self.schedules.iter().map(MissionSchedule::times)
    }

    /// Plan and append one more mission.
    pub fn extend(&mut self) -> Result<&MissionSchedule, PlanningError> {
        let next = match self.schedules.last() {
            Some(previous) => self.generator.next_after(previous)?,
            None => self.generator.first()?,
        };
        self.schedules.push(next);
        let index = self.schedules.len() - 1;
        Ok(&self.schedules[index])
    }

    /// Extend the timeline until it covers `t` and return the schedule containing it.
    pub fn ensure_covered(&mut self, t: f64) -> Result<&MissionSchedule, PlanningError> {
        self.check_query(t)?;
        while self.covered_until() <= t {
            self.extend()?;
        }
        self.schedule_at(t).ok_or(PlanningError::BeforeTimeline {
            t,
            start: self.start(),
        })
    }

    /// Covering schedule among those already planned; never extends.
    pub fn schedule_at(&self, t: f64) -> Option<&MissionSchedule> {
        let hint = self.cursor.get();
        for index in [hint, hint + 1] {
            if let Some(schedule) = self.schedules.get(index) {
                if schedule.contains(t) {
                    self.cursor.set(index);
                    return Some(schedule);
                }
            }
        }

        let index = self.schedules.partition_point(|s| s.t_arrival_return <= t);
        let schedule = self.schedules.get(index)?;
        if !schedule.contains(t) {
            return None;
        }
        self.cursor.set(index);
        Some(schedule)
    }

    /// Ship position at `t`, planning further missions first if `t` is beyond the horizon.
    pub fn sample(&mut self, t: f64) -> Result<PositionFix, PlanningError> {
        self.ensure_covered(t)?;
        self.sample_covered(t)
    }

    /// Ship position at `t` using only schedules already planned.
    pub fn sample_covered(&self, t: f64) -> Result<PositionFix, PlanningError> {
        self.check_query(t)?;
        let schedule = self.schedule_at(t).ok_or(PlanningError::OutsideSchedule {
            t,
            mission_index: self.schedules.len(),
        })?;
        sample_position(
            self.generator.model(),
            self.generator.system(),
            schedule,
            t,
        )
    }

    fn check_query(&self, t: f64) -> Result<(), PlanningError> {
        if !t.is_finite() {
            return Err(PlanningError::NonFiniteTime(t));
        }
        if t < self.start() {
            return Err(PlanningError::BeforeTimeline {
                t,
                start: self.start(),
            });
        }
        Ok(())
    }
}
