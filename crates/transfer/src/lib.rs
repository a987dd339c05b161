//! Transfer façade crate consolidating mission planning and exposing supporting crates.

pub mod bodies;
pub mod mission;

pub use facade::*;
pub use shuttle_impulsive as impulsive;
pub use shuttle_orbits as orbits;

mod facade;
