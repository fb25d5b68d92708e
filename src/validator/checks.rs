//! The fixed sequence of benchmark checks run against every quote.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::domain::round2;
use crate::quote::{QuoteInputs, QuoteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CheckKind {
    BatteryCostPerKwh,
    SolarCostPerWatt,
    InstallationRatio,
    PaybackYears,
    ItcRate,
    FacilitySize,
    BenchmarkDeviation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRange {
    pub min: f64,
    pub max: f64,
}

const fn range(min: f64, max: f64) -> ExpectedRange {
    ExpectedRange { min, max }
}

impl ExpectedRange {
    pub fn contains(&self, v: f64) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub check: CheckKind,
    pub severity: Severity,
    pub message: String,
    pub actual: f64,
    pub expected_range: ExpectedRange,
    pub benchmark: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Not applicable to this quote (no solar, no benchmark peak, zero energy).
    Skipped,
    Passed,
    Flagged(ValidationWarning),
}

pub const BATTERY_IDEAL: ExpectedRange = range(200.0, 500.0);
pub const BATTERY_LIMIT: ExpectedRange = range(150.0, 700.0);
pub const SOLAR_IDEAL: ExpectedRange = range(0.85, 1.60);
pub const SOLAR_LIMIT: ExpectedRange = range(0.6, 2.5);
pub const INSTALL_IDEAL: ExpectedRange = range(0.15, 0.35);
pub const INSTALL_MAX: f64 = 0.5;
pub const PAYBACK_IDEAL: ExpectedRange = range(3.0, 12.0);
pub const PAYBACK_LIMIT: ExpectedRange = range(1.0, 20.0);
pub const ITC_BASE: f64 = 0.30;
pub const ITC_LIMIT: ExpectedRange = range(0.30, 0.50);
pub const SIZE_IDEAL: ExpectedRange = range(0.2, 1.5);
pub const SIZE_MAX: f64 = 3.0;
pub const BENCHMARK_COST_PER_KWH: f64 = 450.0;
pub const DEVIATION_INFO: f64 = 0.25;
pub const DEVIATION_WARNING: f64 = 0.50;

fn flag(
    check: CheckKind,
    severity: Severity,
    actual: f64,
    expected_range: ExpectedRange,
    benchmark: &str,
    message: String,
) -> CheckOutcome {
    CheckOutcome::Flagged(ValidationWarning {
        check,
        severity,
        message,
        actual: round2(actual),
        expected_range,
        benchmark: benchmark.to_string(),
    })
}

/// Band check: inside `ideal` passes, inside `limit` warns, else errors.
fn banded(
    check: CheckKind,
    actual: f64,
    ideal: ExpectedRange,
    limit: ExpectedRange,
    benchmark: &str,
    what: &str,
) -> CheckOutcome {
    if ideal.contains(actual) {
        return CheckOutcome::Passed;
    }
    let severity = if limit.contains(actual) { Severity::Warning } else { Severity::Error };
    flag(
        check,
        severity,
        actual,
        ideal,
        benchmark,
        format!("{what} {:.2} is outside the expected {}-{} range", actual, ideal.min, ideal.max),
    )
}

pub fn battery_cost_per_kwh(quote: &QuoteResult) -> CheckOutcome {
    if quote.energy_kwh <= 0.0 {
        return CheckOutcome::Skipped;
    }
    let per_kwh = quote.equipment.battery / quote.energy_kwh;
    banded(CheckKind::BatteryCostPerKwh, per_kwh, BATTERY_IDEAL, BATTERY_LIMIT, "NREL ATB 2024", "Battery $/kWh")
}

pub fn solar_cost_per_watt(quote: &QuoteResult, inputs: &QuoteInputs) -> CheckOutcome {
    if inputs.solar_mw <= 0.0 {
        return CheckOutcome::Skipped;
    }
    let per_watt = quote.equipment.solar / (inputs.solar_mw * 1_000_000.0);
    banded(CheckKind::SolarCostPerWatt, per_watt, SOLAR_IDEAL, SOLAR_LIMIT, "SEIA/LBNL Tracking the Sun 2024", "Solar $/W")
}

pub fn installation_ratio(quote: &QuoteResult) -> CheckOutcome {
    if quote.costs.equipment_cost <= 0.0 {
        return CheckOutcome::Skipped;
    }
    let ratio = quote.costs.installation_cost / quote.costs.equipment_cost;
    if INSTALL_IDEAL.contains(ratio) {
        return CheckOutcome::Passed;
    }
    let severity = if ratio > INSTALL_MAX { Severity::Error } else { Severity::Warning };
    flag(
        CheckKind::InstallationRatio,
        severity,
        ratio,
        INSTALL_IDEAL,
        "NREL BESS installed-cost breakdown",
        format!("Installation is {:.0}% of equipment cost", ratio * 100.0),
    )
}

pub fn payback_years(quote: &QuoteResult) -> CheckOutcome {
    let years = quote.financials.payback_years;
    banded(CheckKind::PaybackYears, years, PAYBACK_IDEAL, PAYBACK_LIMIT, "Commercial BESS market payback", "Payback years")
}

pub fn itc_rate(quote: &QuoteResult) -> CheckOutcome {
    let rate = quote.assumptions.federal_itc_rate;
    if (rate - ITC_BASE).abs() < 1e-9 {
        return CheckOutcome::Passed;
    }
    let benchmark = "IRA Section 48 ITC (30% base, up to 50% with adders)";
    if ITC_LIMIT.contains(rate) {
        flag(
            CheckKind::ItcRate,
            Severity::Info,
            rate,
            ITC_LIMIT,
            benchmark,
            format!("ITC of {:.0}% assumes bonus adders (energy community / domestic content)", rate * 100.0),
        )
    } else {
        flag(
            CheckKind::ItcRate,
            Severity::Error,
            rate,
            ITC_LIMIT,
            benchmark,
            format!("ITC of {:.0}% is outside the statutory 30-50% range", rate * 100.0),
        )
    }
}

pub fn facility_size(inputs: &QuoteInputs) -> CheckOutcome {
    let Some(peak_mw) = inputs.benchmark_peak_mw.filter(|p| *p > 0.0) else {
        return CheckOutcome::Skipped;
    };
    let ratio = inputs.storage_size_mw / peak_mw;
    if SIZE_IDEAL.contains(ratio) {
        return CheckOutcome::Passed;
    }
    let severity = if ratio > SIZE_MAX { Severity::Error } else { Severity::Warning };
    flag(
        CheckKind::FacilitySize,
        severity,
        ratio,
        SIZE_IDEAL,
        "Facility peak-demand benchmark",
        format!(
            "Storage of {} MW is {:.2}× the estimated {} MW facility peak",
            inputs.storage_size_mw, ratio, peak_mw
        ),
    )
}

pub fn benchmark_deviation(quote: &QuoteResult) -> CheckOutcome {
    let Some(per_kwh) = quote.cost_per_kwh() else {
        return CheckOutcome::Skipped;
    };
    let deviation = (per_kwh - BENCHMARK_COST_PER_KWH).abs() / BENCHMARK_COST_PER_KWH;
    if deviation <= DEVIATION_INFO {
        return CheckOutcome::Passed;
    }
    let severity = if deviation > DEVIATION_WARNING { Severity::Warning } else { Severity::Info };
    let band = BENCHMARK_COST_PER_KWH * DEVIATION_INFO;
    flag(
        CheckKind::BenchmarkDeviation,
        severity,
        per_kwh,
        range(BENCHMARK_COST_PER_KWH - band, BENCHMARK_COST_PER_KWH + band),
        "Installed BESS cost benchmark ($450/kWh)",
        format!("Total ${per_kwh:.0}/kWh deviates {:.0}% from the benchmark", deviation * 100.0),
    )
}

/// Every check, in order.
pub fn run_all(quote: &QuoteResult, inputs: &QuoteInputs) -> Vec<CheckOutcome> {
    vec![
        battery_cost_per_kwh(quote),
        solar_cost_per_watt(quote, inputs),
        installation_ratio(quote),
        payback_years(quote),
        itc_rate(quote),
        facility_size(inputs),
        benchmark_deviation(quote),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CalculationConstants;
    use crate::quote::calculate_quote;
    use rstest::rstest;

    fn quote_with(k: CalculationConstants, solar_mw: f64, peak: Option<f64>) -> (QuoteResult, QuoteInputs) {
        let inputs = QuoteInputs {
            storage_size_mw: 1.0,
            duration_hours: 4.0,
            solar_mw,
            benchmark_peak_mw: peak,
            use_case: None,
        };
        (calculate_quote(&inputs, &k), inputs)
    }

    fn severity(outcome: &CheckOutcome) -> Option<Severity> {
        match outcome {
            CheckOutcome::Flagged(w) => Some(w.severity),
            _ => None,
        }
    }

    #[test]
    fn test_default_quote_passes_everything_applicable() {
        let (q, i) = quote_with(CalculationConstants::default(), 0.0, None);
        let outcomes = run_all(&q, &i);
        assert_eq!(outcomes.len(), 7);
        assert_eq!(outcomes.iter().filter(|o| **o == CheckOutcome::Skipped).count(), 2);
        assert!(outcomes.iter().all(|o| !matches!(o, CheckOutcome::Flagged(_))));
    }

    #[rstest]
    #[case(350.0, None)]
    #[case(550.0, Some(Severity::Warning))]
    #[case(180.0, Some(Severity::Warning))]
    #[case(800.0, Some(Severity::Error))]
    #[case(100.0, Some(Severity::Error))]
    fn test_battery_band(#[case] per_kwh: f64, #[case] expected: Option<Severity>) {
        let k = CalculationConstants { battery_cost_per_kwh: per_kwh, ..CalculationConstants::default() };
        let (q, _) = quote_with(k, 0.0, None);
        assert_eq!(severity(&battery_cost_per_kwh(&q)), expected);
    }

    #[rstest]
    #[case(1.10, None)]
    #[case(2.0, Some(Severity::Warning))]
    #[case(3.0, Some(Severity::Error))]
    fn test_solar_band(#[case] per_watt: f64, #[case] expected: Option<Severity>) {
        let k = CalculationConstants { solar_cost_per_watt: per_watt, ..CalculationConstants::default() };
        let (q, i) = quote_with(k, 0.5, None);
        assert_eq!(severity(&solar_cost_per_watt(&q, &i)), expected);
    }

    #[rstest]
    #[case(0.20, None)]
    #[case(0.40, Some(Severity::Warning))]
    #[case(0.10, Some(Severity::Warning))]
    #[case(0.60, Some(Severity::Error))]
    fn test_installation_ratio(#[case] ratio: f64, #[case] expected: Option<Severity>) {
        let k = CalculationConstants { installation_cost_ratio: ratio, ..CalculationConstants::default() };
        let (q, _) = quote_with(k, 0.0, None);
        assert_eq!(severity(&installation_ratio(&q)), expected);
    }

    #[rstest]
    #[case(0.30, None)]
    #[case(0.40, Some(Severity::Info))]
    #[case(0.10, Some(Severity::Error))]
    #[case(0.60, Some(Severity::Error))]
    fn test_itc_rate(#[case] rate: f64, #[case] expected: Option<Severity>) {
        let k = CalculationConstants { federal_itc_rate: rate, ..CalculationConstants::default() };
        let (q, _) = quote_with(k, 0.0, None);
        assert_eq!(severity(&itc_rate(&q)), expected);
    }

    #[rstest]
    #[case(1.0, None)]
    #[case(0.5, Some(Severity::Warning))]
    #[case(0.25, Some(Severity::Error))]
    fn test_facility_size(#[case] peak_mw: f64, #[case] expected: Option<Severity>) {
        let (_, i) = quote_with(CalculationConstants::default(), 0.0, Some(peak_mw));
        assert_eq!(severity(&facility_size(&i)), expected);
    }

    #[test]
    fn test_payback_bands() {
        let mut q = quote_with(CalculationConstants::default(), 0.0, None).0;
        q.financials.payback_years = 15.0;
        assert_eq!(severity(&payback_years(&q)), Some(Severity::Warning));
        q.financials.payback_years = 2.0;
        assert_eq!(severity(&payback_years(&q)), Some(Severity::Warning));
        q.financials.payback_years = 25.0;
        assert_eq!(severity(&payback_years(&q)), Some(Severity::Error));
        q.financials.payback_years = 0.5;
        assert_eq!(severity(&payback_years(&q)), Some(Severity::Error));
    }

    #[test]
    fn test_benchmark_deviation_levels() {
        // 465 $/kWh: 3% off
        let (q, _) = quote_with(CalculationConstants::default(), 0.0, None);
        assert_eq!(benchmark_deviation(&q), CheckOutcome::Passed);

        // battery at $600 → (2.4M + 150k) × 1.2 / 4000 = $765/kWh, 70% off
        let k = CalculationConstants { battery_cost_per_kwh: 600.0, ..CalculationConstants::default() };
        let (q, _) = quote_with(k, 0.0, None);
        assert_eq!(severity(&benchmark_deviation(&q)), Some(Severity::Warning));

        // battery at $450 → (1.8M + 150k) × 1.2 / 4000 = $585/kWh, 30% off
        let k = CalculationConstants { battery_cost_per_kwh: 450.0, ..CalculationConstants::default() };
        let (q, _) = quote_with(k, 0.0, None);
        assert_eq!(severity(&benchmark_deviation(&q)), Some(Severity::Info));
    }
}
