//! Per-industry peak demand estimators.
//!
//! Every estimator is a total function: it selects a benchmark figure, scales it
//! by the facility size, applies the industry floor and rounds to 0.01 MW.
//! Degenerate inputs (zero, negative, NaN) land on the floor, never below it.

pub mod agriculture;
pub mod car_wash;
pub mod commercial;
pub mod data_center;
pub mod healthcare;
pub mod hospitality;
pub mod industrial;
pub mod residential;
pub mod transport;

pub use agriculture::*;
pub use car_wash::*;
pub use commercial::*;
pub use data_center::*;
pub use healthcare::*;
pub use hospitality::*;
pub use industrial::*;
pub use residential::*;
pub use transport::*;

use tracing::debug;

use super::benchmarks::PeakRange;
use crate::domain::{round2, EchoedInputs, PowerCalculationResult};

/// Clamp a non-finite or negative size to zero so the floor takes over.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Convert a kW figure into the final result: round to 0.01 MW, then floor.
pub(crate) fn finish(
    kw: f64,
    floor_mw: f64,
    duration_hrs: f64,
    description: String,
    calculation_method: impl Into<String>,
) -> PowerCalculationResult {
    let calculation_method = calculation_method.into();
    let rounded = round2(kw / 1000.0);
    // Overflowed or NaN estimates resolve to the floor.
    let power_mw = if rounded.is_finite() {
        floor_mw.max(rounded)
    } else {
        debug!(kw, floor_mw, method = %calculation_method, "non-finite estimate replaced by floor");
        floor_mw
    };
    PowerCalculationResult {
        power_mw,
        duration_hrs,
        description,
        calculation_method,
        inputs: EchoedInputs::new(),
    }
}

/// Apply a diversity factor to a component sum and clamp into the class band.
///
/// Out-of-band results are clamped, not rejected; the clamp is logged so the
/// discarded breakdown signal stays visible.
pub(crate) fn diversified_peak(label: &str, connected_kw: f64, diversity: f64, peak: &PeakRange) -> f64 {
    let diversified = connected_kw * diversity;
    let clamped = peak.clamp(diversified);
    if !peak.contains(diversified) {
        debug!(
            facility = label,
            connected_kw,
            diversified_kw = diversified,
            clamped_kw = clamped,
            min_kw = peak.min_kw,
            max_kw = peak.max_kw,
            "equipment estimate clamped into class peak range"
        );
    }
    clamped
}

/// One named line of an equipment breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LoadComponent {
    pub name: String,
    pub kw: f64,
}

pub(crate) fn breakdown_json(components: &[LoadComponent]) -> serde_json::Value {
    serde_json::Value::Object(
        components
            .iter()
            .map(|c| (c.name.clone(), serde_json::json!(round2(c.kw))))
            .collect(),
    )
}
