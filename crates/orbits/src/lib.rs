//! Body positions from fixed Keplerian elements and the parking orbits flown around them.

pub mod elements;
pub mod kepler;
pub mod parking;

pub use elements::{Body, BodyState, ElementModel, OrbitalElements};
pub use kepler::{KeplerSolver, NumericalError};
pub use parking::{fit_parking_period, outer_point, position_on_parking_orbit};
