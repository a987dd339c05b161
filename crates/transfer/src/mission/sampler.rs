//! Stateless ship position lookup against a finished schedule.

use serde::Serialize;
use shuttle_core::vector::Vector3;
use shuttle_orbits::{ElementModel, position_on_parking_orbit};

use super::PlanningError;
use super::schedule::{MissionSchedule, ScheduleTimes};
use crate::bodies::BodySystem;

/// Active mission phase at a queried time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SourceParking,
    OutboundTransfer,
    TargetParking,
    ReturnTransfer,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::SourceParking => "source_parking",
            Phase::OutboundTransfer => "outbound_transfer",
            Phase::TargetParking => "target_parking",
            Phase::ReturnTransfer => "return_transfer",
        }
    }
}

/// One entry of the position feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionFix {
    pub time: f64,
    pub position: Vector3,
    pub phase: Phase,
    pub times: ScheduleTimes,
}

/// Ship position at `t` within `schedule`.
pub fn sample_position(
    model: &ElementModel,
    system: &BodySystem,
    schedule: &MissionSchedule,
    t: f64,
) -> Result<PositionFix, PlanningError> {
    let phase = schedule
        .phase_at(t)
        .ok_or(PlanningError::OutsideSchedule {
            t,
            mission_index: schedule.mission_index,
        })?;

    let position = match phase {
        Phase::SourceParking => {
            let body = &system.source;
            position_on_parking_orbit(
                model,
                body,
                t,
                schedule.t_start,
                schedule.source_parking_period,
                body.parking_radius,
            )?
        }
        Phase::OutboundTransfer => schedule.outbound.position_at(&model.kepler, t)?,
        Phase::TargetParking => {
            let body = &system.target;
            position_on_parking_orbit(
                model,
                body,
                t,
                schedule.t_arrival_outbound,
                schedule.target_parking_period,
                body.parking_radius,
            )?
        }
        Phase::ReturnTransfer => schedule.inbound.position_at(&model.kepler, t)?,
    };

    Ok(PositionFix {
        time: t,
        position,
        phase,
        times: schedule.times(),
    })
}
