//! Cost and financial model for a sized BESS (+ optional solar) project.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::CalculationConstants;
use crate::domain::round2;

/// Payback reported when the project never pays back.
pub const MAX_PAYBACK_YEARS: f64 = 99.0;
/// Share of nameplate kW assumed to shave billed demand each month.
pub const DEMAND_CHARGE_CAPTURE: f64 = 0.75;
/// Upper bound on the NPV horizon, whatever the lifetime constant says.
pub const MAX_LIFETIME_YEARS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInputs {
    #[serde(rename = "storageSizeMW")]
    pub storage_size_mw: f64,
    pub duration_hours: f64,
    #[serde(rename = "solarMW", default)]
    pub solar_mw: f64,
    /// Estimated facility peak, for the sizing sanity check.
    #[serde(rename = "benchmarkPeakMW", default)]
    pub benchmark_peak_mw: Option<f64>,
    #[serde(default)]
    pub use_case: Option<String>,
}

impl QuoteInputs {
    pub fn energy_kwh(&self) -> f64 {
        self.storage_size_mw * 1000.0 * self.duration_hours
    }

    pub fn power_kw(&self) -> f64 {
        self.storage_size_mw * 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentCosts {
    pub battery: f64,
    pub pcs: f64,
    pub solar: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCosts {
    pub equipment_cost: f64,
    pub installation_cost: f64,
    pub total_project_cost: f64,
    pub tax_credit: f64,
    pub net_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSavings {
    pub demand_charge: f64,
    pub arbitrage: f64,
    pub solar: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub payback_years: f64,
    pub roi_10_year_percent: f64,
    pub roi_25_year_percent: f64,
    pub npv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub energy_kwh: f64,
    pub equipment: EquipmentCosts,
    pub costs: ProjectCosts,
    pub savings: AnnualSavings,
    pub financials: Financials,
    /// Constants the numbers were computed with.
    pub assumptions: CalculationConstants,
}

impl QuoteResult {
    pub fn cost_per_kwh(&self) -> Option<f64> {
        (self.energy_kwh > 0.0).then(|| self.costs.total_project_cost / self.energy_kwh)
    }
}

pub fn calculate_quote(inputs: &QuoteInputs, k: &CalculationConstants) -> QuoteResult {
    let energy_kwh = inputs.energy_kwh();
    let power_kw = inputs.power_kw();
    let solar_kw = inputs.solar_mw * 1000.0;

    let battery = energy_kwh * k.battery_cost_per_kwh;
    let pcs = power_kw * k.pcs_cost_per_kw;
    let solar = inputs.solar_mw * 1_000_000.0 * k.solar_cost_per_watt;
    let equipment_cost = battery + pcs + solar;

    let installation_cost = equipment_cost * k.installation_cost_ratio;
    let total_project_cost = equipment_cost + installation_cost;
    let tax_credit = total_project_cost * k.federal_itc_rate;
    let net_cost = total_project_cost - tax_credit;

    let demand_charge = power_kw * k.demand_charge_per_kw_month * 12.0 * DEMAND_CHARGE_CAPTURE;
    let arbitrage = energy_kwh * k.annual_cycles * k.peak_offpeak_spread_per_kwh * k.round_trip_efficiency;
    let solar_savings = solar_kw * k.solar_yield_kwh_per_kw * k.electricity_rate_per_kwh;
    let annual_savings = demand_charge + arbitrage + solar_savings;

    let payback_years = if annual_savings > 0.0 {
        (net_cost / annual_savings).min(MAX_PAYBACK_YEARS)
    } else {
        MAX_PAYBACK_YEARS
    };

    QuoteResult {
        energy_kwh,
        equipment: EquipmentCosts { battery, pcs, solar, total: equipment_cost },
        costs: ProjectCosts { equipment_cost, installation_cost, total_project_cost, tax_credit, net_cost },
        savings: AnnualSavings { demand_charge, arbitrage, solar: solar_savings, total: annual_savings },
        financials: Financials {
            payback_years: round2(payback_years),
            roi_10_year_percent: round2(roi_percent(annual_savings, net_cost, 10.0)),
            roi_25_year_percent: round2(roi_percent(annual_savings, net_cost, 25.0)),
            npv: round2(npv(annual_savings, net_cost, k)),
        },
        assumptions: *k,
    }
}

fn roi_percent(annual_savings: f64, net_cost: f64, years: f64) -> f64 {
    if net_cost <= 0.0 {
        return 0.0;
    }
    (annual_savings * years - net_cost) / net_cost * 100.0
}

fn lifetime_years(raw: f64) -> u32 {
    let years = if raw.is_finite() { raw.round().clamp(0.0, f64::from(MAX_LIFETIME_YEARS)) as u32 } else { 0 };
    if f64::from(years) != raw.round() {
        debug!(raw, years, "project lifetime clamped for NPV");
    }
    years
}

/// Discounted savings over the project life, savings degrading each year.
fn npv(annual_savings: f64, net_cost: f64, k: &CalculationConstants) -> f64 {
    let years = lifetime_years(k.project_lifetime_years);
    let discounted: f64 = (1..=years)
        .map(|year| {
            let degraded = annual_savings * (1.0 - k.annual_degradation_rate).powi(year as i32 - 1);
            degraded / (1.0 + k.discount_rate).powi(year as i32)
        })
        .sum();
    discounted - net_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn inputs(mw: f64, hours: f64, solar_mw: f64) -> QuoteInputs {
        QuoteInputs { storage_size_mw: mw, duration_hours: hours, solar_mw, benchmark_peak_mw: None, use_case: None }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_one_mw_four_hour_costs() {
        let q = calculate_quote(&inputs(1.0, 4.0, 0.0), &CalculationConstants::default());
        assert_eq!(q.energy_kwh, 4_000.0);
        assert!(approx(q.equipment.battery, 1_400_000.0));
        assert!(approx(q.equipment.pcs, 150_000.0));
        assert!(approx(q.costs.installation_cost, 310_000.0));
        assert!(approx(q.costs.total_project_cost, 1_860_000.0));
        assert!(approx(q.costs.tax_credit, 558_000.0));
        assert!(approx(q.costs.net_cost, 1_302_000.0));
    }

    #[test]
    fn test_savings_components() {
        let q = calculate_quote(&inputs(1.0, 4.0, 0.5), &CalculationConstants::default());
        // 1,000 kW × $15 × 12 × 0.75
        assert!(approx(q.savings.demand_charge, 135_000.0));
        // 4,000 kWh × 250 × $0.08 × 0.85
        assert!(approx(q.savings.arbitrage, 68_000.0));
        // 500 kW × 1,400 kWh/kW × $0.12
        assert!(approx(q.savings.solar, 84_000.0));
        assert!(approx(q.equipment.solar, 550_000.0));
    }

    #[test]
    fn test_payback_capped_without_savings() {
        let k = CalculationConstants {
            demand_charge_per_kw_month: 0.0,
            peak_offpeak_spread_per_kwh: 0.0,
            ..CalculationConstants::default()
        };
        let q = calculate_quote(&inputs(1.0, 4.0, 0.0), &k);
        assert_eq!(q.financials.payback_years, MAX_PAYBACK_YEARS);
    }

    #[test]
    fn test_npv_positive_for_good_project() {
        let q = calculate_quote(&inputs(1.0, 4.0, 0.0), &CalculationConstants::default());
        // 203k/yr against 1.302M net
        assert!(q.financials.payback_years > 6.0 && q.financials.payback_years < 7.0);
        assert!(q.financials.npv > 0.0);
        assert!(q.financials.roi_25_year_percent > q.financials.roi_10_year_percent);
    }

    #[test]
    fn test_cost_per_kwh() {
        let q = calculate_quote(&inputs(1.0, 4.0, 0.0), &CalculationConstants::default());
        assert_eq!(q.cost_per_kwh(), Some(465.0));
        let empty = calculate_quote(&inputs(0.0, 4.0, 0.0), &CalculationConstants::default());
        assert_eq!(empty.cost_per_kwh(), None);
    }

    #[rstest]
    #[case(25.0, 25)]
    #[case(25.4, 25)]
    #[case(-3.0, 0)]
    #[case(1e12, MAX_LIFETIME_YEARS)]
    #[case(f64::INFINITY, 0)]
    #[case(f64::NAN, 0)]
    fn test_lifetime_years(#[case] raw: f64, #[case] expected: u32) {
        assert_eq!(lifetime_years(raw), expected);
    }

    #[test]
    fn test_huge_lifetime_constant_is_capped() {
        let huge = CalculationConstants { project_lifetime_years: 1e12, ..CalculationConstants::default() };
        let capped = CalculationConstants { project_lifetime_years: 50.0, ..CalculationConstants::default() };
        let a = calculate_quote(&inputs(1.0, 4.0, 0.0), &huge);
        let b = calculate_quote(&inputs(1.0, 4.0, 0.0), &capped);
        assert_eq!(a.financials.npv, b.financials.npv);
        assert!(a.financials.npv.is_finite());
    }
}
