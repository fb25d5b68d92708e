use super::{finish, sanitize};
use crate::domain::{format_thousands, PowerCalculationResult};
use crate::power::benchmarks::{self, duration};

pub fn calculate_apartment_power(unit_count: f64) -> PowerCalculationResult {
    let units = sanitize(unit_count);
    let kw = units * benchmarks::APARTMENT_KW_PER_UNIT;
    finish(
        kw,
        benchmarks::APARTMENT_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Apartment complex: {} units × {} kW/unit (diversified) = {} kW peak demand",
            format_thousands(units),
            benchmarks::APARTMENT_KW_PER_UNIT,
            format_thousands(kw)
        ),
        "NEC 220 multifamily diversified demand (1.5 kW/unit)",
    )
    .echo("unitCount", units)
}

pub fn calculate_college_power(student_count: f64) -> PowerCalculationResult {
    let students = sanitize(student_count);
    let kw = students * benchmarks::COLLEGE_KW_PER_STUDENT;
    finish(
        kw,
        benchmarks::COLLEGE_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "College/university: {} students × {} kW/student = {} kW campus peak",
            format_thousands(students),
            benchmarks::COLLEGE_KW_PER_STUDENT,
            format_thousands(kw)
        ),
        "APPA campus benchmark (0.45 kW/student)",
    )
    .echo("studentCount", students)
}
