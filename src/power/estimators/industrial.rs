use super::{commercial::calculate_density_power, finish, sanitize};
use crate::domain::{format_thousands, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, ManufacturingType};

pub fn calculate_manufacturing_power(square_feet: f64, manufacturing_type: ManufacturingType) -> PowerCalculationResult {
    let sq_ft = sanitize(square_feet);
    let density = manufacturing_type.watts_per_sq_ft();
    let kw = sq_ft * density / 1000.0;
    finish(
        kw,
        benchmarks::MANUFACTURING_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Manufacturing ({manufacturing_type}): {} sq ft × {density} W/sq ft = {} kW peak demand",
            format_thousands(sq_ft),
            format_thousands(kw)
        ),
        format!("DOE MECS process load benchmark ({density} W/sq ft, {manufacturing_type})"),
    )
    .echo("squareFeet", sq_ft)
    .echo("manufacturingType", manufacturing_type.to_string())
}

pub fn calculate_warehouse_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::WAREHOUSE)
}

/// Refrigerated storage: product loss on outage drives an 8h backup window.
pub fn calculate_cold_storage_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::COLD_STORAGE)
}

pub fn calculate_water_treatment_power(flow_mgd: f64) -> PowerCalculationResult {
    let mgd = sanitize(flow_mgd);
    let kw = mgd * benchmarks::WATER_TREATMENT_KW_PER_MGD;
    finish(
        kw,
        benchmarks::WATER_TREATMENT_FLOOR_MW,
        duration::WATER_TREATMENT,
        format!(
            "Water treatment: {mgd} MGD × {} kW/MGD = {} kW peak demand",
            format_thousands(benchmarks::WATER_TREATMENT_KW_PER_MGD),
            format_thousands(kw)
        ),
        "EPRI water/wastewater benchmark (1,500 kW per MGD)",
    )
    .echo("flowMGD", mgd)
}
