//! Facility peak-demand estimation.
//!
//! `benchmarks` holds the published tables, `estimators` the per-industry
//! formulas, and `dispatch` the slug-keyed entry point the rest of the crate uses.

pub mod benchmarks;
pub mod dispatch;
pub mod estimators;
pub mod fields;
pub mod inputs;

pub use dispatch::{calculate_use_case_power, GridConnection};
pub use inputs::{FacilityInputs, FacilityType};
