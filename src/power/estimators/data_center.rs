use serde::{Deserialize, Serialize};

use super::{breakdown_json, diversified_peak, finish, sanitize, LoadComponent};
use crate::domain::{format_thousands, round2, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, DataCenterClass, DataCenterTier};

/// Facility load = IT load × tier PUE.
pub fn calculate_data_center_power(it_load_kw: f64, tier: DataCenterTier) -> PowerCalculationResult {
    let it_kw = sanitize(it_load_kw);
    let pue = tier.pue();
    let kw = it_kw * pue;
    finish(
        kw,
        benchmarks::DATA_CENTER_FLOOR_MW,
        duration::DATA_CENTER,
        format!(
            "Data center ({tier}): {} kW IT × PUE {pue} = {} kW facility load",
            format_thousands(it_kw),
            format_thousands(kw)
        ),
        format!("Uptime Institute tier PUE ({tier}, PUE {pue})"),
    )
    .echo("itLoadKW", it_kw)
    .echo("tier", tier.to_string())
    .echo("pue", pue)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCenterEquipmentInput {
    pub it_load_kw: f64,
    /// Derived from the IT load when absent.
    pub data_center_class: Option<DataCenterClass>,
}

pub fn calculate_data_center_power_from_equipment(input: DataCenterEquipmentInput) -> PowerCalculationResult {
    let it_kw = sanitize(input.it_load_kw);
    let class = input
        .data_center_class
        .unwrap_or_else(|| DataCenterClass::from_it_load_kw(it_kw));
    let p = class.profile();

    let components = vec![
        LoadComponent { name: "IT equipment".into(), kw: it_kw },
        LoadComponent { name: "Cooling".into(), kw: it_kw * p.cooling_fraction },
        LoadComponent { name: "UPS & distribution losses".into(), kw: it_kw * p.distribution_loss_fraction },
        LoadComponent { name: "Lighting & support".into(), kw: p.support_kw },
    ];
    let connected_kw: f64 = components.iter().map(|c| c.kw).sum();
    let peak_kw = diversified_peak("data-center", connected_kw, p.coincidence, &p.peak);

    finish(
        peak_kw,
        benchmarks::DATA_CENTER_FLOOR_MW,
        duration::DATA_CENTER,
        format!(
            "Data center ({class}): {} kW IT, {} kW connected × {} coincidence = {} kW peak",
            format_thousands(it_kw),
            format_thousands(connected_kw),
            p.coincidence,
            format_thousands(peak_kw)
        ),
        "Equipment-based load analysis (IT + cooling + distribution losses)",
    )
    .echo("itLoadKW", it_kw)
    .echo("dataCenterClass", class.to_string())
    .echo("connectedLoadKW", round2(connected_kw))
    .echo("breakdown", breakdown_json(&components))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_center_default_tier() {
        let r = calculate_data_center_power(2_000.0, DataCenterTier::Tier3);
        assert_eq!(r.power_mw, 3.0);
        assert_eq!(r.duration_hrs, 4.0);
        assert_eq!(r.inputs["pue"], 1.5);
    }

    #[test]
    fn test_data_center_tier_changes_pue() {
        let t1 = calculate_data_center_power(1_000.0, DataCenterTier::Tier1);
        let t4 = calculate_data_center_power(1_000.0, DataCenterTier::Tier4);
        assert!(t1.power_mw > t4.power_mw);
    }

    #[test]
    fn test_data_center_from_equipment() {
        // 2,000 + 1,000 + 140 + 50 = 3,190 kW × 0.9 = 2,871 kW
        let r = calculate_data_center_power_from_equipment(DataCenterEquipmentInput {
            it_load_kw: 2_000.0,
            data_center_class: None,
        });
        assert_eq!(r.inputs["dataCenterClass"], "enterprise");
        assert_eq!(r.power_mw, 2.87);
    }

    #[test]
    fn test_data_center_from_equipment_zero_load_hits_band_floor() {
        let r = calculate_data_center_power_from_equipment(DataCenterEquipmentInput {
            it_load_kw: 0.0,
            data_center_class: Some(DataCenterClass::Edge),
        });
        assert_eq!(r.power_mw, 0.1);
    }
}
