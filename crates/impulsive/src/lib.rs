//! Heliocentric impulsive transfers in AU and days.
//!
//! `lambert` connects two positions in a fixed time; `transfers::hohmann` gives the
//! coplanar circular estimate the transfer timer starts from.

pub mod lambert;
pub mod transfers;

pub use lambert::{LambertSolverError, solve as lambert_solve};
