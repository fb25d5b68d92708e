use super::{finish, sanitize};
use crate::domain::{format_thousands, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, HospitalType};

/// Hospital peak demand by licensed beds. Critical facility: 8h backup.
pub fn calculate_hospital_power(bed_count: f64, hospital_type: HospitalType) -> PowerCalculationResult {
    let beds = sanitize(bed_count);
    let kw_per_bed = hospital_type.kw_per_bed();
    let kw = beds * kw_per_bed;
    finish(
        kw,
        benchmarks::HOSPITAL_FLOOR_MW,
        duration::HOSPITAL,
        format!(
            "Hospital ({hospital_type}): {} beds × {kw_per_bed} kW/bed = {} kW peak demand",
            format_thousands(beds),
            format_thousands(kw)
        ),
        format!("ASHE hospital energy benchmark ({kw_per_bed} kW/bed, {hospital_type})"),
    )
    .echo("bedCount", beds)
    .echo("hospitalType", hospital_type.to_string())
}

pub fn calculate_senior_living_power(bed_count: f64) -> PowerCalculationResult {
    let beds = sanitize(bed_count);
    let kw = beds * benchmarks::SENIOR_LIVING_KW_PER_BED;
    finish(
        kw,
        benchmarks::SENIOR_LIVING_FLOOR_MW,
        duration::SENIOR_LIVING,
        format!(
            "Senior living: {} beds × {} kW/bed = {} kW peak demand",
            format_thousands(beds),
            benchmarks::SENIOR_LIVING_KW_PER_BED,
            format_thousands(kw)
        ),
        "CBECS nursing/assisted living (3 kW/bed)",
    )
    .echo("bedCount", beds)
}
