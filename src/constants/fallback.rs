use serde::{Deserialize, Serialize};

/// Compiled-in constant, used whenever the live source is missing a key or
/// cannot be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackConstant {
    pub key: &'static str,
    pub value: f64,
    pub category: &'static str,
}

const fn c(key: &'static str, value: f64, category: &'static str) -> FallbackConstant {
    FallbackConstant { key, value, category }
}

pub mod keys {
    pub const BATTERY_COST_PER_KWH: &str = "battery_cost_per_kwh";
    pub const PCS_COST_PER_KW: &str = "pcs_cost_per_kw";
    pub const SOLAR_COST_PER_WATT: &str = "solar_cost_per_watt";
    pub const INSTALLATION_COST_RATIO: &str = "installation_cost_ratio";
    pub const FEDERAL_ITC_RATE: &str = "federal_itc_rate";
    pub const DISCOUNT_RATE: &str = "discount_rate";
    pub const PROJECT_LIFETIME_YEARS: &str = "project_lifetime_years";
    pub const ELECTRICITY_RATE_PER_KWH: &str = "electricity_rate_per_kwh";
    pub const DEMAND_CHARGE_PER_KW_MONTH: &str = "demand_charge_per_kw_month";
    pub const PEAK_OFFPEAK_SPREAD_PER_KWH: &str = "peak_offpeak_spread_per_kwh";
    pub const ROUND_TRIP_EFFICIENCY: &str = "round_trip_efficiency";
    pub const ANNUAL_CYCLES: &str = "annual_cycles";
    pub const SOLAR_YIELD_KWH_PER_KW: &str = "solar_yield_kwh_per_kw";
    pub const ANNUAL_DEGRADATION_RATE: &str = "annual_degradation_rate";
}

pub const FALLBACK_CONSTANTS: [FallbackConstant; 14] = [
    c(keys::BATTERY_COST_PER_KWH, 350.0, "equipment"),
    c(keys::PCS_COST_PER_KW, 150.0, "equipment"),
    c(keys::SOLAR_COST_PER_WATT, 1.10, "equipment"),
    c(keys::INSTALLATION_COST_RATIO, 0.20, "installation"),
    c(keys::FEDERAL_ITC_RATE, 0.30, "incentives"),
    c(keys::DISCOUNT_RATE, 0.08, "financial"),
    c(keys::PROJECT_LIFETIME_YEARS, 25.0, "financial"),
    c(keys::ELECTRICITY_RATE_PER_KWH, 0.12, "utility"),
    c(keys::DEMAND_CHARGE_PER_KW_MONTH, 15.0, "utility"),
    c(keys::PEAK_OFFPEAK_SPREAD_PER_KWH, 0.08, "utility"),
    c(keys::ROUND_TRIP_EFFICIENCY, 0.85, "performance"),
    c(keys::ANNUAL_CYCLES, 250.0, "performance"),
    c(keys::SOLAR_YIELD_KWH_PER_KW, 1400.0, "performance"),
    c(keys::ANNUAL_DEGRADATION_RATE, 0.005, "performance"),
];

pub fn lookup(key: &str) -> Option<&'static FallbackConstant> {
    FALLBACK_CONSTANTS.iter().find(|c| c.key == key)
}

pub fn value(key: &str) -> Option<f64> {
    lookup(key).map(|c| c.value)
}

/// The typed constant set one quote calculation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationConstants {
    pub battery_cost_per_kwh: f64,
    pub pcs_cost_per_kw: f64,
    pub solar_cost_per_watt: f64,
    pub installation_cost_ratio: f64,
    pub federal_itc_rate: f64,
    pub discount_rate: f64,
    pub project_lifetime_years: f64,
    pub electricity_rate_per_kwh: f64,
    pub demand_charge_per_kw_month: f64,
    pub peak_offpeak_spread_per_kwh: f64,
    pub round_trip_efficiency: f64,
    pub annual_cycles: f64,
    pub solar_yield_kwh_per_kw: f64,
    pub annual_degradation_rate: f64,
}

impl CalculationConstants {
    /// Build from a key lookup; keys it cannot answer use the fallback table.
    pub fn from_lookup(get: impl Fn(&str) -> Option<f64>) -> Self {
        let v = |key: &str| get(key).or_else(|| value(key)).unwrap_or_default();
        Self {
            battery_cost_per_kwh: v(keys::BATTERY_COST_PER_KWH),
            pcs_cost_per_kw: v(keys::PCS_COST_PER_KW),
            solar_cost_per_watt: v(keys::SOLAR_COST_PER_WATT),
            installation_cost_ratio: v(keys::INSTALLATION_COST_RATIO),
            federal_itc_rate: v(keys::FEDERAL_ITC_RATE),
            discount_rate: v(keys::DISCOUNT_RATE),
            project_lifetime_years: v(keys::PROJECT_LIFETIME_YEARS),
            electricity_rate_per_kwh: v(keys::ELECTRICITY_RATE_PER_KWH),
            demand_charge_per_kw_month: v(keys::DEMAND_CHARGE_PER_KW_MONTH),
            peak_offpeak_spread_per_kwh: v(keys::PEAK_OFFPEAK_SPREAD_PER_KWH),
            round_trip_efficiency: v(keys::ROUND_TRIP_EFFICIENCY),
            annual_cycles: v(keys::ANNUAL_CYCLES),
            solar_yield_kwh_per_kw: v(keys::SOLAR_YIELD_KWH_PER_KW),
            annual_degradation_rate: v(keys::ANNUAL_DEGRADATION_RATE),
        }
    }
}

impl Default for CalculationConstants {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
