//! Master dispatcher: slug + loose attributes in, power estimate out.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::{debug, warn};

use super::fields;
use super::inputs::{FacilityInputs, FacilityType};
use crate::domain::{round2, FacilityAttributes, PowerCalculationResult};

pub const USER_PEAK_LOAD_METHOD: &str = "User-provided peak load (utility bill)";

/// Smallest peak a user override can set, so a tiny bill value never yields 0 MW.
const MIN_USER_PEAK_MW: f64 = 0.01;

/// Wizard default for the daily operating hours question.
pub const DEFAULT_OPERATING_HOURS: f64 = 12.0;

/// Grid connection quality from the universal wizard questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum GridConnection {
    #[default]
    #[strum(to_string = "reliable", serialize = "on-grid", serialize = "on_grid", serialize = "stable")]
    Reliable,
    #[strum(to_string = "limited", serialize = "constrained", serialize = "limited-capacity")]
    Limited,
    #[strum(to_string = "unreliable", serialize = "weak", serialize = "unstable")]
    Unreliable,
    #[strum(to_string = "off_grid", serialize = "off-grid", serialize = "offgrid", serialize = "islanded")]
    OffGrid,
    #[strum(to_string = "microgrid", serialize = "micro-grid")]
    Microgrid,
}

impl GridConnection {
    /// Minimum backup duration this grid situation demands.
    pub fn min_duration_hrs(self) -> Option<f64> {
        match self {
            GridConnection::Reliable | GridConnection::Limited => None,
            GridConnection::Unreliable => Some(6.0),
            GridConnection::OffGrid | GridConnection::Microgrid => Some(8.0),
        }
    }
}

/// Estimate peak demand and backup duration for any facility slug.
///
/// Total: unknown slugs fall back to the generic square-footage heuristic, and
/// every missing or garbled attribute resolves to a per-type default.
pub fn calculate_use_case_power(slug: &str, attrs: &FacilityAttributes) -> PowerCalculationResult {
    let facility = FacilityType::from_slug(slug);
    if facility.is_none() {
        warn!(slug, "unrecognized use case slug, using generic 5 W/sq ft estimate");
    }

    let inputs = FacilityInputs::normalize(facility, attrs);
    debug!(slug, ?inputs, "normalized facility inputs");

    let use_case = facility.map(FacilityType::slug).unwrap_or("generic");
    let estimate = inputs.estimate().echo("useCase", use_case);
    apply_site_overrides(estimate, attrs)
}

/// Universal questions that apply on top of any industry estimate.
fn apply_site_overrides(mut result: PowerCalculationResult, attrs: &FacilityAttributes) -> PowerCalculationResult {
    if let Some(peak_mw) = fields::PEAK_LOAD_MW.number(attrs).filter(|mw| *mw > 0.0 && round2(*mw).is_finite()) {
        let estimated_mw = result.power_mw;
        result.power_mw = round2(peak_mw).max(MIN_USER_PEAK_MW);
        result.description = format!(
            "User-provided peak load of {} MW (benchmark estimate was {estimated_mw} MW)",
            result.power_mw
        );
        result.calculation_method = USER_PEAK_LOAD_METHOD.to_string();
        result = result.echo("estimatedPowerMW", estimated_mw).echo("peakLoad", peak_mw);
    }

    // Informational: echoed for the quote narrative, never scales the peak.
    let operating_hours = fields::OPERATING_HOURS
        .number(attrs)
        .filter(|h| *h > 0.0 && *h <= 24.0)
        .unwrap_or(DEFAULT_OPERATING_HOURS);
    result = result.echo("operatingHours", operating_hours);

    if let Some(grid) = fields::GRID_CONNECTION.parse::<GridConnection>(attrs) {
        result = result.echo("gridConnection", grid.to_string());
        if grid == GridConnection::Limited {
            if let Some(capacity_mw) = fields::GRID_CAPACITY_MW.number(attrs) {
                result = result.echo("gridCapacityMW", capacity_mw);
            }
        }
        if let Some(min_hrs) = grid.min_duration_hrs() {
            if result.duration_hrs < min_hrs {
                let base = result.duration_hrs;
                result.duration_hrs = min_hrs;
                result.description.push_str(&format!("; backup extended from {base}h to {min_hrs}h ({grid} grid)"));
                result = result.echo("baseDurationHrs", base);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use crate::power::benchmarks as b;
    use proptest::prelude::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_office_fifty_thousand_sq_ft() {
        let attrs = FacilityAttributes::new().with("squareFeet", 50_000);
        let r = calculate_use_case_power("office", &attrs);
        assert_eq!(r.power_mw, 0.3);
        assert_eq!(r.duration_hrs, 4.0);
        assert!(r.description.contains("50,000 sq ft"), "{}", r.description);
        assert_eq!(r.inputs["useCase"], "office");
    }

    #[test]
    fn test_alias_slug_matches_canonical() {
        let attrs = FacilityAttributes::new().with("itLoadKW", 1_000);
        let edge = calculate_use_case_power("edge-data-center", &attrs);
        let canonical = calculate_use_case_power("data-center", &attrs);
        assert_eq!(edge, canonical);
    }

    #[test]
    fn test_unknown_slug_uses_generic_density() {
        let attrs = FacilityAttributes::new().with("squareFeet", 100_000);
        let r = calculate_use_case_power("spaceport", &attrs);
        // 100,000 × 5 W = 500 kW
        assert_eq!(r.power_mw, 0.5);
        assert_eq!(r.inputs["useCase"], "generic");
    }

    #[rstest]
    #[case("hotel", 150.0)]
    #[case("hospital", 200.0)]
    #[case("apartment", 100.0)]
    fn test_defaults_are_echoed(#[case] slug: &str, #[case] expected_count: f64) {
        let r = calculate_use_case_power(slug, &FacilityAttributes::new());
        let echoed = ["roomCount", "bedCount", "unitCount"]
            .iter()
            .find_map(|k| r.inputs.get(*k))
            .and_then(|v| v.as_f64());
        assert_eq!(echoed, Some(expected_count));
    }

    #[rstest]
    #[case(None, 12.0)]
    #[case(Some(FieldValue::from(24)), 24.0)]
    #[case(Some(FieldValue::from("16 hours")), 16.0)]
    #[case(Some(FieldValue::from(30)), 12.0)]
    #[case(Some(FieldValue::from(-2)), 12.0)]
    fn test_operating_hours_echoed(#[case] answer: Option<FieldValue>, #[case] expected: f64) {
        let attrs = match answer {
            Some(v) => FacilityAttributes::new().with("squareFeet", 50_000).with("operatingHours", v),
            None => FacilityAttributes::new().with("squareFeet", 50_000),
        };
        let r = calculate_use_case_power("office", &attrs);
        assert_eq!(r.inputs["operatingHours"], expected);
        assert_eq!(r.power_mw, 0.3);
    }

    #[test]
    fn test_peak_load_overrides_estimate() {
        let attrs = FacilityAttributes::new().with("squareFeet", 50_000).with("peakLoad", "1.25");
        let r = calculate_use_case_power("office", &attrs);
        assert_eq!(r.power_mw, 1.25);
        assert_eq!(r.calculation_method, USER_PEAK_LOAD_METHOD);
        assert_eq!(r.inputs["estimatedPowerMW"], 0.3);
    }

    #[rstest]
    #[case("reliable", 4.0)]
    #[case("limited", 4.0)]
    #[case("unreliable", 6.0)]
    #[case("off_grid", 8.0)]
    #[case("off-grid", 8.0)]
    #[case("microgrid", 8.0)]
    fn test_grid_connection_duration(#[case] grid: &str, #[case] expected_hrs: f64) {
        let attrs = FacilityAttributes::new().with("gridConnection", grid);
        let r = calculate_use_case_power("office", &attrs);
        assert_eq!(r.duration_hrs, expected_hrs);
    }

    #[test]
    fn test_grid_never_shortens_duration() {
        let attrs = FacilityAttributes::new().with("gridConnection", "unreliable");
        let r = calculate_use_case_power("hospital", &attrs);
        assert_eq!(r.duration_hrs, 8.0);
    }

    #[test]
    fn test_limited_grid_echoes_capacity() {
        let attrs = FacilityAttributes::new().with("gridConnection", "limited").with("gridCapacity", 2);
        let r = calculate_use_case_power("warehouse", &attrs);
        assert_eq!(r.inputs["gridCapacityMW"], 2.0);
    }

    #[test]
    fn test_every_facility_type_with_empty_attributes() {
        for ft in FacilityType::iter() {
            let r = calculate_use_case_power(ft.slug(), &FacilityAttributes::new());
            assert!(r.power_mw > 0.0, "{ft}: {}", r.power_mw);
            assert!(r.duration_hrs > 0.0, "{ft}");
            assert!(!r.description.is_empty(), "{ft}");
        }
    }

    /// Every key a size-driven estimator reads.
    const SIZE_KEYS: &[&str] = &[
        "squareFeet", "roomCount", "bedCount", "itLoadKW", "rackCount", "kwPerRack", "annualPassengers",
        "bayCount", "gamingFloorSqFt", "growingAreaSqFt", "ledWattsPerSqFt", "acreage", "unitCount",
        "studentCount", "seatCount", "fuelPumps", "storeSqFt", "level2Chargers", "dcfcChargers", "hpcChargers",
        "evPorts", "flowMGD",
    ];

    fn degenerate(value: Option<FieldValue>) -> FacilityAttributes {
        match value {
            Some(v) => SIZE_KEYS.iter().map(|k| (*k, v.clone())).collect(),
            None => FacilityAttributes::new(),
        }
    }

    #[rstest]
    #[case("office", b::OFFICE.floor_mw)]
    #[case("hotel", b::HOTEL_FLOOR_MW)]
    #[case("hospital", b::HOSPITAL_FLOOR_MW)]
    #[case("senior-living", b::SENIOR_LIVING_FLOOR_MW)]
    #[case("data-center", b::DATA_CENTER_FLOOR_MW)]
    #[case("airport", b::AIRPORT_FLOOR_MW)]
    #[case("car-wash", b::CAR_WASH_FLOOR_MW)]
    #[case("manufacturing", b::MANUFACTURING_FLOOR_MW)]
    #[case("warehouse", b::WAREHOUSE.floor_mw)]
    #[case("cold-storage", b::COLD_STORAGE.floor_mw)]
    #[case("retail", b::RETAIL.floor_mw)]
    #[case("shopping-center", b::SHOPPING_CENTER.floor_mw)]
    #[case("restaurant", b::RESTAURANT.floor_mw)]
    #[case("grocery", b::GROCERY.floor_mw)]
    #[case("casino", b::CASINO_GAMING_FLOOR.floor_mw)]
    #[case("indoor-farm", b::INDOOR_FARM_FLOOR_MW)]
    #[case("agriculture", b::AGRICULTURE_FLOOR_MW)]
    #[case("apartment", b::APARTMENT_FLOOR_MW)]
    #[case("college", b::COLLEGE_FLOOR_MW)]
    #[case("school", b::SCHOOL.floor_mw)]
    #[case("gas-station", b::GAS_STATION_FLOOR_MW)]
    #[case("government", b::GOVERNMENT.floor_mw)]
    #[case("ev-charging", b::ev::FLOOR_MW)]
    #[case("fitness-center", b::FITNESS_CENTER.floor_mw)]
    #[case("laboratory", b::LABORATORY.floor_mw)]
    #[case("stadium", b::STADIUM_FLOOR_MW)]
    #[case("water-treatment", b::WATER_TREATMENT_FLOOR_MW)]
    #[case("parking-garage", b::PARKING_FLOOR_MW)]
    #[case("spaceport", b::GENERIC.floor_mw)]
    fn test_degenerate_sizes_respect_floor(
        #[case] slug: &str,
        #[case] floor_mw: f64,
        #[values(
            Some(FieldValue::Number(0.0)),
            Some(FieldValue::Number(-5.0)),
            Some(FieldValue::Number(f64::NAN)),
            Some(FieldValue::from("n/a")),
            None
        )]
        value: Option<FieldValue>,
    ) {
        let r = calculate_use_case_power(slug, &degenerate(value.clone()));
        assert!(r.power_mw.is_finite(), "{slug} {value:?}");
        assert!(r.power_mw >= floor_mw, "{slug} {value:?}: {} < {floor_mw}", r.power_mw);
    }

    proptest! {
        #[test]
        fn prop_dispatch_is_total(slug in "\\PC{0,24}", size in proptest::num::f64::ANY, text in "\\PC{0,12}") {
            let attrs = FacilityAttributes::new()
                .with("squareFeet", size)
                .with("roomCount", text.as_str())
                .with("bedCount", size)
                .with("itLoadKW", size);
            let r = calculate_use_case_power(&slug, &attrs);
            prop_assert!(r.power_mw.is_finite());
            prop_assert!(r.power_mw >= 0.02, "{}", r.power_mw);
            prop_assert!(r.duration_hrs > 0.0);
        }

        #[test]
        fn prop_dispatch_is_deterministic(idx in 0usize..28, size in 0.0f64..5_000_000.0) {
            let ft = FacilityType::iter().nth(idx).unwrap_or(FacilityType::Office);
            let attrs = FacilityAttributes::new().with("squareFeet", size);
            prop_assert_eq!(
                calculate_use_case_power(ft.slug(), &attrs),
                calculate_use_case_power(ft.slug(), &attrs)
            );
        }
    }
}
