//! Earth–Mars shuttle planner.
//!
//! The workspace crates are re-exported here so front-ends (CLI, plotting) can
//! depend on one library.

pub use shuttle_config as config;
pub use shuttle_core as primitives;
pub use shuttle_export as export;
pub use shuttle_impulsive as impulsive;
pub use shuttle_orbits as orbits;
pub use shuttle_transfer as transfer;

pub mod feed;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
