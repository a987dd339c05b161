//! Re-exported APIs for consumers of the transfer crate.

pub use crate::bodies::{BodyId, BodySystem};
pub use crate::mission::clearance::{ClearanceChecker, ClearanceReport};
pub use crate::mission::leg::{TransferError, TransferKind, TransferLeg};
pub use crate::mission::sampler::{Phase, PositionFix, sample_position};
pub use crate::mission::schedule::{
    GeneratorSettings, MissionSchedule, MissionScheduleGenerator, ScheduleTimes,
};
pub use crate::mission::timeline::ScheduleTimeline;
pub use crate::mission::timer::{TimerError, TransferTimer, TransferTiming};
pub use crate::mission::window::{LaunchWindow, LaunchWindowSearch, WindowError};
pub use crate::mission::{PlanningError, SchedulingError};
pub use shuttle_orbits::{Body, ElementModel, KeplerSolver, NumericalError, OrbitalElements};
