use serde::{Deserialize, Serialize};

use super::{breakdown_json, diversified_peak, finish, sanitize, LoadComponent};
use crate::domain::{format_thousands, PowerCalculationResult};
use crate::power::benchmarks::{self, duration, HotelClass, HotelFacilityType};

pub fn calculate_hotel_power(room_count: f64, hotel_class: HotelClass) -> PowerCalculationResult {
    let rooms = sanitize(room_count);
    let kw_per_room = hotel_class.kw_per_room();
    let kw = rooms * kw_per_room;
    finish(
        kw,
        benchmarks::HOTEL_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Hotel ({hotel_class}): {} rooms × {kw_per_room} kW/room = {} kW peak demand",
            format_thousands(rooms),
            format_thousands(kw)
        ),
        format!("CBECS lodging benchmark ({kw_per_room} kW/room, {hotel_class})"),
    )
    .echo("roomCount", rooms)
    .echo("hotelClass", hotel_class.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelEquipmentInput {
    pub room_count: f64,
    /// Derived from the room count when absent.
    pub facility_type: Option<HotelFacilityType>,
}

/// Bottom-up hotel estimate from named sub-loads.
///
/// Validated against a 133-room select-service property (Marriott Lancaster)
/// with a measured 384 kW peak.
pub fn calculate_hotel_power_from_equipment(input: HotelEquipmentInput) -> PowerCalculationResult {
    let rooms = sanitize(input.room_count);
    let facility_type = input
        .facility_type
        .unwrap_or_else(|| HotelFacilityType::from_room_count(rooms));
    let p = facility_type.profile();

    let components = vec![
        LoadComponent { name: "HVAC".into(), kw: rooms * p.hvac_kw_per_room },
        LoadComponent { name: "Lighting & plug loads".into(), kw: rooms * p.lighting_plug_kw_per_room },
        LoadComponent { name: "Domestic hot water".into(), kw: rooms * p.hot_water_kw_per_room },
        LoadComponent { name: "Elevators".into(), kw: p.elevator_count as f64 * p.kw_per_elevator },
        LoadComponent { name: "Kitchen".into(), kw: p.kitchen_kw },
        LoadComponent { name: "Laundry".into(), kw: p.laundry_kw },
        LoadComponent { name: "Pool & spa".into(), kw: p.pool_kw },
        LoadComponent { name: "Common areas".into(), kw: p.common_area_kw },
    ];
    let connected_kw: f64 = components.iter().map(|c| c.kw).sum();
    let peak_kw = diversified_peak("hotel", connected_kw, p.diversity, &p.peak);

    finish(
        peak_kw,
        benchmarks::HOTEL_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Hotel ({facility_type}): {} rooms, {} kW connected × {} diversity = {} kW peak (range {}-{} kW)",
            format_thousands(rooms),
            format_thousands(connected_kw),
            p.diversity,
            format_thousands(peak_kw),
            format_thousands(p.peak.min_kw),
            format_thousands(p.peak.max_kw)
        ),
        "Equipment-based load analysis (ASHRAE/CBECS hotel sub-loads)",
    )
    .echo("roomCount", rooms)
    .echo("facilityType", facility_type.to_string())
    .echo("connectedLoadKW", crate::domain::round2(connected_kw))
    .echo("peakDemandKW", crate::domain::round2(peak_kw))
    .echo("breakdown", breakdown_json(&components))
}

pub fn calculate_casino_power(gaming_floor_sq_ft: f64) -> PowerCalculationResult {
    let sq_ft = sanitize(gaming_floor_sq_ft);
    let b = &benchmarks::CASINO_GAMING_FLOOR;
    let kw = sq_ft * b.watts_per_sq_ft / 1000.0;
    finish(
        kw,
        b.floor_mw,
        b.duration_hrs,
        format!(
            "Casino: {} sq ft gaming floor × {} W/sq ft = {} kW peak demand",
            format_thousands(sq_ft),
            b.watts_per_sq_ft,
            format_thousands(kw)
        ),
        b.method,
    )
    .echo("gamingFloorSqFt", sq_ft)
}

pub fn calculate_stadium_power(seat_count: f64) -> PowerCalculationResult {
    let seats = sanitize(seat_count);
    let kw = seats * benchmarks::STADIUM_KW_PER_SEAT;
    finish(
        kw,
        benchmarks::STADIUM_FLOOR_MW,
        duration::GENERAL_COMMERCIAL,
        format!(
            "Stadium/arena: {} seats × {} kW/seat = {} kW event-day peak",
            format_thousands(seats),
            benchmarks::STADIUM_KW_PER_SEAT,
            format_thousands(kw)
        ),
        "Venue event-day peak (0.1 kW/seat incl. sports lighting)",
    )
    .echo("seatCount", seats)
}
