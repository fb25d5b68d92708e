use super::{finish, sanitize};
use crate::domain::{format_thousands, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, AgricultureType};

/// Controlled-environment agriculture: LED canopy density plus HVAC and
/// dehumidification overhead.
pub fn calculate_indoor_farm_power(growing_area_sq_ft: f64, led_watts_per_sq_ft: f64) -> PowerCalculationResult {
    let sq_ft = sanitize(growing_area_sq_ft);
    let led = match sanitize(led_watts_per_sq_ft) {
        w if w > 0.0 => w,
        _ => benchmarks::INDOOR_FARM_DEFAULT_LED_W_PER_SQ_FT,
    };
    let lighting_kw = sq_ft * led / 1000.0;
    let kw = lighting_kw * benchmarks::INDOOR_FARM_HVAC_MULTIPLIER;
    finish(
        kw,
        benchmarks::INDOOR_FARM_FLOOR_MW,
        duration::INDOOR_FARM,
        format!(
            "Indoor farm: {} sq ft canopy × {led} W/sq ft LED = {} kW × {} HVAC factor = {} kW",
            format_thousands(sq_ft),
            format_thousands(lighting_kw),
            benchmarks::INDOOR_FARM_HVAC_MULTIPLIER,
            format_thousands(kw)
        ),
        "CEA lighting density with HVAC/dehumidification multiplier (1.3)",
    )
    .echo("growingAreaSqFt", sq_ft)
    .echo("ledWattsPerSqFt", led)
}

pub fn calculate_agriculture_power(acreage: f64, farm_type: AgricultureType) -> PowerCalculationResult {
    let acres = sanitize(acreage);
    let kw_per_acre = farm_type.kw_per_acre();
    let kw = acres * kw_per_acre;
    finish(
        kw,
        benchmarks::AGRICULTURE_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Agriculture ({farm_type}): {} acres × {kw_per_acre} kW/acre = {} kW peak demand",
            format_thousands(acres),
            format_thousands(kw)
        ),
        format!("USDA on-farm energy benchmark ({kw_per_acre} kW/acre, {farm_type})"),
    )
    .echo("acreage", acres)
    .echo("farmType", farm_type.to_string())
}
