use super::{finish, sanitize};
use crate::domain::{format_thousands, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, DensityBenchmark};

/// Area-density estimate shared by the W/sq ft industries.
pub fn calculate_density_power(square_feet: f64, benchmark: &DensityBenchmark) -> PowerCalculationResult {
    let sq_ft = sanitize(square_feet);
    let kw = sq_ft * benchmark.watts_per_sq_ft / 1000.0;
    finish(
        kw,
        benchmark.floor_mw,
        benchmark.duration_hrs,
        format!(
            "{}: {} sq ft × {} W/sq ft = {} kW peak demand",
            benchmark.label,
            format_thousands(sq_ft),
            benchmark.watts_per_sq_ft,
            format_thousands(kw)
        ),
        benchmark.method,
    )
    .echo("squareFeet", sq_ft)
}

pub fn calculate_office_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::OFFICE)
}

pub fn calculate_retail_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::RETAIL)
}

pub fn calculate_shopping_center_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::SHOPPING_CENTER)
}

pub fn calculate_restaurant_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::RESTAURANT)
}

pub fn calculate_grocery_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::GROCERY)
}

pub fn calculate_government_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::GOVERNMENT)
}

pub fn calculate_school_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::SCHOOL)
}

pub fn calculate_fitness_center_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::FITNESS_CENTER)
}

pub fn calculate_laboratory_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::LABORATORY)
}

/// Fallback for facility types without a dedicated benchmark.
pub fn calculate_generic_power(square_feet: f64) -> PowerCalculationResult {
    calculate_density_power(square_feet, &benchmarks::GENERIC)
}

/// Fuel dispensers plus the convenience store.
pub fn calculate_gas_station_power(fuel_pumps: f64, store_sq_ft: f64) -> PowerCalculationResult {
    let pumps = sanitize(fuel_pumps);
    let store = sanitize(store_sq_ft);
    let pump_kw = pumps * benchmarks::GAS_STATION_KW_PER_PUMP;
    let store_kw = store * benchmarks::GAS_STATION_STORE_W_PER_SQ_FT / 1000.0;
    finish(
        pump_kw + store_kw,
        benchmarks::GAS_STATION_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Gas station: {} pumps × {} kW + {} sq ft store × {} W/sq ft = {} kW",
            format_thousands(pumps),
            benchmarks::GAS_STATION_KW_PER_PUMP,
            format_thousands(store),
            benchmarks::GAS_STATION_STORE_W_PER_SQ_FT,
            format_thousands(pump_kw + store_kw)
        ),
        "NACS fuel retail benchmark (1.5 kW/dispenser, 12 W/sq ft store)",
    )
    .echo("fuelPumps", pumps)
    .echo("storeSqFt", store)
}

pub fn calculate_parking_garage_power(square_feet: f64, ev_ports: f64) -> PowerCalculationResult {
    let sq_ft = sanitize(square_feet);
    let ports = sanitize(ev_ports);
    let base_kw = sq_ft * benchmarks::PARKING_W_PER_SQ_FT / 1000.0;
    let ev_kw = ports * benchmarks::PARKING_KW_PER_EV_PORT;
    finish(
        base_kw + ev_kw,
        benchmarks::PARKING_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Parking garage: {} sq ft × {} W/sq ft + {} EV ports × {} kW = {} kW",
            format_thousands(sq_ft),
            benchmarks::PARKING_W_PER_SQ_FT,
            format_thousands(ports),
            benchmarks::PARKING_KW_PER_EV_PORT,
            format_thousands(base_kw + ev_kw)
        ),
        "IES parking lighting + Level 2 EV ports (7.2 kW)",
    )
    .echo("squareFeet", sq_ft)
    .echo("evPorts", ports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_office_reference_case() {
        let r = calculate_office_power(50_000.0);
        assert_eq!(r.power_mw, 0.3);
        assert_eq!(r.duration_hrs, 4.0);
        assert!(r.description.contains("50,000 sq ft"));
        assert_eq!(r.calculation_method, "ASHRAE 90.1 peak demand (6 W/sq ft)");
        assert_eq!(r.inputs["squareFeet"], 50_000.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-100.0)]
    #[case(f64::NAN)]
    #[case(10.0)]
    fn test_office_floor(#[case] sq_ft: f64) {
        assert_eq!(calculate_office_power(sq_ft).power_mw, 0.03);
    }

    #[rstest]
    #[case::retail(calculate_retail_power as fn(f64) -> PowerCalculationResult, 100_000.0, 0.8)]
    #[case::mall(calculate_shopping_center_power, 200_000.0, 2.0)]
    #[case::restaurant(calculate_restaurant_power, 5_000.0, 0.2)]
    #[case::grocery(calculate_grocery_power, 40_000.0, 0.6)]
    #[case::government(calculate_government_power, 80_000.0, 0.4)]
    #[case::school(calculate_school_power, 120_000.0, 0.6)]
    #[case::gym(calculate_fitness_center_power, 30_000.0, 0.21)]
    #[case::lab(calculate_laboratory_power, 40_000.0, 0.6)]
    #[case::generic(calculate_generic_power, 10_000.0, 0.05)]
    fn test_density_estimators(
        #[case] estimator: fn(f64) -> PowerCalculationResult,
        #[case] sq_ft: f64,
        #[case] expected_mw: f64,
    ) {
        assert_eq!(estimator(sq_ft).power_mw, expected_mw);
    }

    #[test]
    fn test_gas_station() {
        // 12 × 1.5 = 18 kW + 3,000 × 12 W = 36 kW => 54 kW => 0.05 MW
        let r = calculate_gas_station_power(12.0, 3_000.0);
        assert_eq!(r.power_mw, 0.05);
        assert!(r.description.contains("12 pumps"));
    }

    #[test]
    fn test_parking_garage_with_ev_ports() {
        // 200k × 0.5 W = 100 kW + 20 × 7.2 = 144 kW => 0.24 MW
        let r = calculate_parking_garage_power(200_000.0, 20.0);
        assert_eq!(r.power_mw, 0.24);
    }
}
