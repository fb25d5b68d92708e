use serde::{Deserialize, Serialize};

use super::{breakdown_json, diversified_peak, finish, sanitize, LoadComponent};
use crate::domain::{format_thousands, round2, PowerCalculationResult};
use crate::power::benchmarks::{self, airport_band, duration, ev, AirportClass};

/// Airport peak demand from annual passengers (millions), tiered by hub band.
pub fn calculate_airport_power(annual_passengers_millions: f64) -> PowerCalculationResult {
    let passengers_m = sanitize(annual_passengers_millions);
    let band = airport_band(passengers_m);
    let mw = (passengers_m * band.mw_per_million).clamp(band.min_mw, band.max_mw);
    finish(
        mw * 1000.0,
        benchmarks::AIRPORT_FLOOR_MW,
        duration::AIRPORT,
        format!(
            "Airport ({}): {passengers_m}M passengers/yr × {} MW per million = {} MW (band {}-{} MW)",
            band.name,
            band.mw_per_million,
            round2(mw),
            band.min_mw,
            band.max_mw
        ),
        format!("FAA hub classification benchmark ({})", band.name),
    )
    .echo("annualPassengersMillions", passengers_m)
    .echo("classification", band.name)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportEquipmentInput {
    pub annual_passengers_millions: Option<f64>,
    pub terminal_sq_ft: Option<f64>,
    pub gate_count: Option<f64>,
    pub airport_class: Option<AirportClass>,
}

pub fn calculate_airport_power_from_equipment(input: AirportEquipmentInput) -> PowerCalculationResult {
    let class = input
        .airport_class
        .or_else(|| input.annual_passengers_millions.map(AirportClass::from_passengers_m))
        .unwrap_or(AirportClass::SmallHub);
    let p = class.profile();
    let passengers_m = sanitize(input.annual_passengers_millions.unwrap_or(p.default_passengers_m));
    let terminal_sq_ft = sanitize(input.terminal_sq_ft.unwrap_or(p.default_terminal_sq_ft));
    let gates = sanitize(input.gate_count.unwrap_or(p.default_gates));

    let components = vec![
        LoadComponent {
            name: "Terminal HVAC & lighting".into(),
            kw: terminal_sq_ft * p.terminal_w_per_sq_ft / 1000.0,
        },
        LoadComponent { name: "Gate equipment (jet bridge, PCA, 400 Hz)".into(), kw: gates * p.kw_per_gate },
        LoadComponent {
            name: "Baggage handling".into(),
            kw: passengers_m * p.baggage_kw_per_million_pax,
        },
        LoadComponent { name: "Airfield lighting".into(), kw: p.airfield_lighting_kw },
    ];
    let connected_kw: f64 = components.iter().map(|c| c.kw).sum();
    let peak_kw = diversified_peak("airport", connected_kw, p.diversity, &p.peak);

    finish(
        peak_kw,
        benchmarks::AIRPORT_FLOOR_MW,
        duration::AIRPORT,
        format!(
            "Airport ({class}): {} sq ft terminal, {} gates, {passengers_m}M passengers; {} kW connected × {} diversity = {} kW peak",
            format_thousands(terminal_sq_ft),
            format_thousands(gates),
            format_thousands(connected_kw),
            p.diversity,
            format_thousands(peak_kw)
        ),
        "Equipment-based load analysis (terminal, gates, baggage, airfield)",
    )
    .echo("airportClass", class.to_string())
    .echo("terminalSqFt", terminal_sq_ft)
    .echo("gateCount", gates)
    .echo("annualPassengersMillions", passengers_m)
    .echo("breakdown", breakdown_json(&components))
}

/// EV charging hub: charger nameplate × coincidence. Short 2h backup window.
pub fn calculate_ev_charging_power(level2: f64, dcfc: f64, hpc: f64) -> PowerCalculationResult {
    let level2 = sanitize(level2);
    let dcfc = sanitize(dcfc);
    let hpc = sanitize(hpc);
    let nameplate_kw = level2 * ev::LEVEL2_KW + dcfc * ev::DCFC_KW + hpc * ev::HPC_KW;
    let kw = nameplate_kw * ev::COINCIDENCE;
    finish(
        kw,
        ev::FLOOR_MW,
        duration::EV_CHARGING,
        format!(
            "EV charging: {} L2 × {} kW + {} DCFC × {} kW + {} HPC × {} kW = {} kW × {} coincidence = {} kW",
            format_thousands(level2),
            ev::LEVEL2_KW,
            format_thousands(dcfc),
            ev::DCFC_KW,
            format_thousands(hpc),
            ev::HPC_KW,
            format_thousands(nameplate_kw),
            ev::COINCIDENCE,
            format_thousands(kw)
        ),
        "SAE J1772/CCS nameplate with 0.7 coincidence factor",
    )
    .echo("level2Chargers", level2)
    .echo("dcfcChargers", dcfc)
    .echo("hpcChargers", hpc)
}
