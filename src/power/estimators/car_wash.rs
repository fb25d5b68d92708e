use serde::{Deserialize, Serialize};

use super::{breakdown_json, diversified_peak, finish, sanitize, LoadComponent};
use crate::domain::{format_thousands, round2, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, CarWashType};

pub fn calculate_car_wash_power(bay_count: f64, wash_type: CarWashType) -> PowerCalculationResult {
    let bays = sanitize(bay_count);
    let kw_per_bay = wash_type.kw_per_bay();
    let kw = bays * kw_per_bay;
    finish(
        kw,
        benchmarks::CAR_WASH_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Car wash ({wash_type}): {} bays × {kw_per_bay} kW/bay = {} kW peak demand",
            format_thousands(bays),
            format_thousands(kw)
        ),
        format!("ICA car wash benchmark ({kw_per_bay} kW/bay, {wash_type})"),
    )
    .echo("bayCount", bays)
    .echo("carWashType", wash_type.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarWashEquipmentInput {
    pub bay_count: f64,
    pub car_wash_type: CarWashType,
}

pub fn calculate_car_wash_power_from_equipment(input: CarWashEquipmentInput) -> PowerCalculationResult {
    let bays = sanitize(input.bay_count);
    let profile = input.car_wash_type.equipment();
    let components: Vec<LoadComponent> = profile
        .items
        .iter()
        .map(|item| LoadComponent {
            name: item.name.to_string(),
            kw: if item.per_bay { item.kw * bays } else { item.kw },
        })
        .collect();
    let connected_kw: f64 = components.iter().map(|c| c.kw).sum();
    let peak_kw = diversified_peak("car-wash", connected_kw, profile.diversity, &profile.peak);

    finish(
        peak_kw,
        benchmarks::CAR_WASH_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Car wash ({}): {} bays, {} kW connected × {} diversity = {} kW peak",
            input.car_wash_type,
            format_thousands(bays),
            format_thousands(connected_kw),
            profile.diversity,
            format_thousands(peak_kw)
        ),
        "Equipment-based load analysis (pumps, dryers, vacuums, water heating)",
    )
    .echo("bayCount", bays)
    .echo("carWashType", input.car_wash_type.to_string())
    .echo("connectedLoadKW", round2(connected_kw))
    .echo("breakdown", breakdown_json(&components))
}
