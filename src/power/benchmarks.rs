//! Industry benchmark tables used by the per-industry estimators.
//!
//! Pure data: densities, per-unit loads, classification bands and equipment
//! breakdowns. Nothing in here computes a facility estimate on its own.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::domain::FieldValue;

/// Version tag of the benchmark set, stamped on every audit record.
pub const BENCHMARK_VERSION: &str = "2025.1";

// ============================================================================
// Backup duration by criticality
// ============================================================================

pub mod duration {
    pub const GENERAL_COMMERCIAL: f64 = 4.0;
    pub const HOSPITAL: f64 = 8.0;
    pub const COLD_STORAGE: f64 = 8.0;
    pub const DATA_CENTER: f64 = 4.0;
    pub const EV_CHARGING: f64 = 2.0;
    pub const AIRPORT: f64 = 4.0;
    pub const INDOOR_FARM: f64 = 6.0;
    pub const WATER_TREATMENT: f64 = 6.0;
    pub const SENIOR_LIVING: f64 = 6.0;
}

// ============================================================================
// Area-density benchmarks (W/sq ft)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityBenchmark {
    pub label: &'static str,
    pub watts_per_sq_ft: f64,
    pub floor_mw: f64,
    pub duration_hrs: f64,
    pub method: &'static str,
}

pub const OFFICE: DensityBenchmark = DensityBenchmark {
    label: "Office",
    watts_per_sq_ft: 6.0,
    floor_mw: 0.03,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "ASHRAE 90.1 peak demand (6 W/sq ft)",
};

pub const RETAIL: DensityBenchmark = DensityBenchmark {
    label: "Retail",
    watts_per_sq_ft: 8.0,
    floor_mw: 0.02,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS retail peak demand (8 W/sq ft)",
};

pub const SHOPPING_CENTER: DensityBenchmark = DensityBenchmark {
    label: "Shopping center",
    watts_per_sq_ft: 10.0,
    floor_mw: 0.1,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS enclosed mall peak demand (10 W/sq ft)",
};

pub const RESTAURANT: DensityBenchmark = DensityBenchmark {
    label: "Restaurant",
    watts_per_sq_ft: 40.0,
    floor_mw: 0.02,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS food service peak demand (40 W/sq ft)",
};

pub const GROCERY: DensityBenchmark = DensityBenchmark {
    label: "Grocery",
    watts_per_sq_ft: 15.0,
    floor_mw: 0.05,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS food sales peak demand incl. refrigeration (15 W/sq ft)",
};

pub const WAREHOUSE: DensityBenchmark = DensityBenchmark {
    label: "Warehouse",
    watts_per_sq_ft: 2.0,
    floor_mw: 0.05,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS non-refrigerated warehouse (2 W/sq ft)",
};

pub const COLD_STORAGE: DensityBenchmark = DensityBenchmark {
    label: "Cold storage",
    watts_per_sq_ft: 6.0,
    floor_mw: 0.1,
    duration_hrs: duration::COLD_STORAGE,
    method: "CBECS refrigerated warehouse (6 W/sq ft)",
};

pub const GOVERNMENT: DensityBenchmark = DensityBenchmark {
    label: "Government building",
    watts_per_sq_ft: 5.0,
    floor_mw: 0.05,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "FEMP public building peak demand (5 W/sq ft)",
};

pub const SCHOOL: DensityBenchmark = DensityBenchmark {
    label: "K-12 school",
    watts_per_sq_ft: 5.0,
    floor_mw: 0.05,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS education peak demand (5 W/sq ft)",
};

pub const FITNESS_CENTER: DensityBenchmark = DensityBenchmark {
    label: "Fitness center",
    watts_per_sq_ft: 7.0,
    floor_mw: 0.02,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "CBECS public assembly/recreation (7 W/sq ft)",
};

pub const LABORATORY: DensityBenchmark = DensityBenchmark {
    label: "Laboratory",
    watts_per_sq_ft: 15.0,
    floor_mw: 0.05,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "Labs21 laboratory peak demand (15 W/sq ft)",
};

pub const CASINO_GAMING_FLOOR: DensityBenchmark = DensityBenchmark {
    label: "Casino",
    watts_per_sq_ft: 18.0,
    floor_mw: 0.2,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "Gaming floor peak demand (18 W/sq ft)",
};

pub const GENERIC: DensityBenchmark = DensityBenchmark {
    label: "Commercial facility",
    watts_per_sq_ft: 5.0,
    floor_mw: 0.05,
    duration_hrs: duration::GENERAL_COMMERCIAL,
    method: "Generic commercial estimate (5 W/sq ft)",
};

// ============================================================================
// Per-unit benchmarks
// ============================================================================

pub const HOTEL_FLOOR_MW: f64 = 0.05;
pub const HOSPITAL_FLOOR_MW: f64 = 0.2;
pub const SENIOR_LIVING_KW_PER_BED: f64 = 3.0;
pub const SENIOR_LIVING_FLOOR_MW: f64 = 0.05;
pub const APARTMENT_KW_PER_UNIT: f64 = 1.5;
pub const APARTMENT_FLOOR_MW: f64 = 0.05;
pub const COLLEGE_KW_PER_STUDENT: f64 = 0.45;
pub const COLLEGE_FLOOR_MW: f64 = 0.2;
pub const STADIUM_KW_PER_SEAT: f64 = 0.1;
pub const STADIUM_FLOOR_MW: f64 = 0.5;
pub const GAS_STATION_KW_PER_PUMP: f64 = 1.5;
pub const GAS_STATION_STORE_W_PER_SQ_FT: f64 = 12.0;
pub const GAS_STATION_FLOOR_MW: f64 = 0.02;
pub const PARKING_W_PER_SQ_FT: f64 = 0.5;
pub const PARKING_KW_PER_EV_PORT: f64 = 7.2;
pub const PARKING_FLOOR_MW: f64 = 0.02;
pub const WATER_TREATMENT_KW_PER_MGD: f64 = 1500.0;
pub const WATER_TREATMENT_FLOOR_MW: f64 = 0.1;
pub const MANUFACTURING_FLOOR_MW: f64 = 0.1;
pub const AGRICULTURE_FLOOR_MW: f64 = 0.05;
pub const INDOOR_FARM_DEFAULT_LED_W_PER_SQ_FT: f64 = 40.0;
pub const INDOOR_FARM_HVAC_MULTIPLIER: f64 = 1.3;
pub const INDOOR_FARM_FLOOR_MW: f64 = 0.05;
pub const DATA_CENTER_KW_PER_RACK: f64 = 8.0;
pub const DATA_CENTER_FLOOR_MW: f64 = 0.1;
pub const AIRPORT_FLOOR_MW: f64 = 0.5;
pub const CAR_WASH_FLOOR_MW: f64 = 0.02;

pub mod ev {
    pub const LEVEL2_KW: f64 = 7.2;
    pub const DCFC_KW: f64 = 150.0;
    pub const HPC_KW: f64 = 350.0;
    pub const COINCIDENCE: f64 = 0.7;
    pub const FLOOR_MW: f64 = 0.05;
}

// ============================================================================
// Sub-type classifications
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum HotelClass {
    #[strum(to_string = "economy", serialize = "budget", serialize = "limited-service")]
    Economy,
    #[default]
    #[strum(to_string = "midscale", serialize = "mid-scale", serialize = "midrange", serialize = "select-service")]
    Midscale,
    #[strum(to_string = "upscale", serialize = "upper-upscale", serialize = "full-service")]
    Upscale,
    #[strum(to_string = "luxury", serialize = "resort")]
    Luxury,
}

impl HotelClass {
    pub fn kw_per_room(self) -> f64 {
        match self {
            HotelClass::Economy => 2.5,
            HotelClass::Midscale => 3.5,
            HotelClass::Upscale => 5.0,
            HotelClass::Luxury => 7.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum HospitalType {
    #[default]
    #[strum(to_string = "community", serialize = "general", serialize = "rural")]
    Community,
    #[strum(to_string = "regional", serialize = "regional-medical-center")]
    Regional,
    #[strum(to_string = "academic", serialize = "teaching", serialize = "academic-medical-center")]
    Academic,
    #[strum(to_string = "specialty", serialize = "specialty-surgical", serialize = "surgical")]
    Specialty,
}

impl HospitalType {
    pub fn kw_per_bed(self) -> f64 {
        match self {
            HospitalType::Community => 5.0,
            HospitalType::Regional => 7.5,
            HospitalType::Academic => 10.0,
            HospitalType::Specialty => 8.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DataCenterTier {
    #[strum(to_string = "tier1", serialize = "tier-1", serialize = "tier i", serialize = "1")]
    Tier1,
    #[strum(to_string = "tier2", serialize = "tier-2", serialize = "tier ii", serialize = "2")]
    Tier2,
    #[default]
    #[strum(to_string = "tier3", serialize = "tier-3", serialize = "tier iii", serialize = "3")]
    Tier3,
    #[strum(to_string = "tier4", serialize = "tier-4", serialize = "tier iv", serialize = "4")]
    Tier4,
}

impl DataCenterTier {
    /// Accepts `4`, `"4"`, `"Tier 4"`, `"tier_4"`, `"tier-iv"` and the like.
    pub fn from_answer(value: &FieldValue) -> Option<Self> {
        let level = match value {
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 => n.to_string(),
            FieldValue::Text(s) => s
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
                .collect::<String>()
                .to_ascii_lowercase(),
            _ => return None,
        };
        match level.strip_prefix("tier").unwrap_or(&level) {
            "1" | "i" => Some(DataCenterTier::Tier1),
            "2" | "ii" => Some(DataCenterTier::Tier2),
            "3" | "iii" => Some(DataCenterTier::Tier3),
            "4" | "iv" => Some(DataCenterTier::Tier4),
            _ => None,
        }
    }

    /// Uptime-tier typical PUE.
    pub fn pue(self) -> f64 {
        match self {
            DataCenterTier::Tier1 => 1.8,
            DataCenterTier::Tier2 => 1.6,
            DataCenterTier::Tier3 => 1.5,
            DataCenterTier::Tier4 => 1.4,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum ManufacturingType {
    #[strum(to_string = "light", serialize = "light-assembly", serialize = "assembly")]
    Light,
    #[default]
    #[strum(to_string = "medium", serialize = "general")]
    Medium,
    #[strum(to_string = "heavy", serialize = "heavy-industrial", serialize = "process")]
    Heavy,
    #[strum(to_string = "cleanroom", serialize = "electronics", serialize = "semiconductor", serialize = "pharmaceutical")]
    Cleanroom,
}

impl ManufacturingType {
    pub fn watts_per_sq_ft(self) -> f64 {
        match self {
            ManufacturingType::Light => 8.0,
            ManufacturingType::Medium => 12.0,
            ManufacturingType::Heavy => 20.0,
            ManufacturingType::Cleanroom => 30.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum AgricultureType {
    #[default]
    #[strum(to_string = "row-crops", serialize = "row crops", serialize = "crops", serialize = "irrigation")]
    RowCrops,
    #[strum(to_string = "orchard", serialize = "vineyard")]
    Orchard,
    #[strum(to_string = "greenhouse")]
    Greenhouse,
    #[strum(to_string = "dairy")]
    Dairy,
    #[strum(to_string = "livestock", serialize = "poultry", serialize = "ranch")]
    Livestock,
}

impl AgricultureType {
    pub fn kw_per_acre(self) -> f64 {
        match self {
            AgricultureType::RowCrops => 0.4,
            AgricultureType::Orchard => 0.3,
            AgricultureType::Greenhouse => 25.0,
            AgricultureType::Dairy => 1.2,
            AgricultureType::Livestock => 0.8,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum CarWashType {
    #[strum(to_string = "selfServe", serialize = "self-serve", serialize = "self-service", serialize = "self_serve")]
    SelfServe,
    #[strum(to_string = "inBayAutomatic", serialize = "in-bay-automatic", serialize = "in-bay", serialize = "automatic")]
    InBayAutomatic,
    #[default]
    #[strum(to_string = "tunnel", serialize = "express-tunnel", serialize = "express")]
    Tunnel,
    #[strum(to_string = "fullService", serialize = "full-service", serialize = "full_service")]
    FullService,
}

impl CarWashType {
    pub fn kw_per_bay(self) -> f64 {
        match self {
            CarWashType::SelfServe => 15.0,
            CarWashType::InBayAutomatic => 45.0,
            CarWashType::Tunnel => 150.0,
            CarWashType::FullService => 180.0,
        }
    }

    pub fn equipment(self) -> &'static EquipmentProfile {
        match self {
            CarWashType::SelfServe => &CAR_WASH_SELF_SERVE,
            CarWashType::InBayAutomatic => &CAR_WASH_IN_BAY,
            CarWashType::Tunnel => &CAR_WASH_TUNNEL,
            CarWashType::FullService => &CAR_WASH_FULL_SERVICE,
        }
    }
}

// ============================================================================
// Airport passenger bands
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportBand {
    pub name: &'static str,
    /// Upper bound (exclusive) in millions of annual passengers.
    pub max_passengers_m: f64,
    pub mw_per_million: f64,
    pub min_mw: f64,
    pub max_mw: f64,
}

pub const AIRPORT_BANDS: [AirportBand; 5] = [
    AirportBand { name: "non-hub", max_passengers_m: 1.0, mw_per_million: 1.5, min_mw: 0.5, max_mw: 2.0 },
    AirportBand { name: "small hub", max_passengers_m: 5.0, mw_per_million: 1.2, min_mw: 1.5, max_mw: 6.0 },
    AirportBand { name: "medium hub", max_passengers_m: 15.0, mw_per_million: 1.0, min_mw: 5.0, max_mw: 15.0 },
    AirportBand { name: "large hub", max_passengers_m: 50.0, mw_per_million: 0.8, min_mw: 12.0, max_mw: 40.0 },
    AirportBand { name: "mega hub", max_passengers_m: f64::INFINITY, mw_per_million: 0.6, min_mw: 30.0, max_mw: 100.0 },
];

pub fn airport_band(passengers_m: f64) -> &'static AirportBand {
    AIRPORT_BANDS
        .iter()
        .find(|b| passengers_m < b.max_passengers_m)
        .unwrap_or(&AIRPORT_BANDS[AIRPORT_BANDS.len() - 1])
}

// ============================================================================
// Equipment breakdowns ("from equipment" estimators)
// ============================================================================

/// Inclusive peak range for a facility class, in kW.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakRange {
    pub min_kw: f64,
    pub max_kw: f64,
}

impl PeakRange {
    pub fn clamp(&self, kw: f64) -> f64 {
        self.min_kw.max(self.max_kw.min(kw))
    }

    pub fn contains(&self, kw: f64) -> bool {
        kw >= self.min_kw && kw <= self.max_kw
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentItem {
    pub name: &'static str,
    pub kw: f64,
    /// Scales with the bay/tunnel count rather than once per site.
    pub per_bay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentProfile {
    pub items: &'static [EquipmentItem],
    pub diversity: f64,
    pub peak: PeakRange,
}

const fn bay(name: &'static str, kw: f64) -> EquipmentItem {
    EquipmentItem { name, kw, per_bay: true }
}

const fn site(name: &'static str, kw: f64) -> EquipmentItem {
    EquipmentItem { name, kw, per_bay: false }
}

pub const CAR_WASH_SELF_SERVE: EquipmentProfile = EquipmentProfile {
    items: &[
        bay("High-pressure pumps", 7.5),
        bay("Water heating", 6.0),
        bay("Lighting & controls", 1.0),
        site("Vacuum stations", 11.0),
    ],
    diversity: 0.7,
    peak: PeakRange { min_kw: 30.0, max_kw: 150.0 },
};

pub const CAR_WASH_IN_BAY: EquipmentProfile = EquipmentProfile {
    items: &[
        bay("High-pressure pumps", 15.0),
        bay("Dryers", 30.0),
        bay("Water heating", 12.0),
        bay("Chemical dosing & controls", 3.0),
        site("Vacuum stations", 11.0),
        site("Water reclaim", 5.5),
    ],
    diversity: 0.7,
    peak: PeakRange { min_kw: 40.0, max_kw: 250.0 },
};

pub const CAR_WASH_TUNNEL: EquipmentProfile = EquipmentProfile {
    items: &[
        bay("Conveyor", 15.0),
        bay("High-pressure pumps", 45.0),
        bay("Dryers/blowers", 90.0),
        bay("Water heating", 30.0),
        bay("Brush & wrap motors", 25.0),
        site("Vacuum stations", 30.0),
        site("Water reclaim", 11.0),
        site("Lighting & controls", 10.0),
    ],
    diversity: 0.7,
    peak: PeakRange { min_kw: 100.0, max_kw: 500.0 },
};

pub const CAR_WASH_FULL_SERVICE: EquipmentProfile = EquipmentProfile {
    items: &[
        bay("Conveyor", 15.0),
        bay("High-pressure pumps", 45.0),
        bay("Dryers/blowers", 90.0),
        bay("Water heating", 30.0),
        bay("Brush & wrap motors", 25.0),
        site("Interior cleaning vacuums", 45.0),
        site("Vacuum stations", 30.0),
        site("Water reclaim", 11.0),
        site("Lighting & controls", 15.0),
    ],
    diversity: 0.7,
    peak: PeakRange { min_kw: 150.0, max_kw: 700.0 },
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum HotelFacilityType {
    #[strum(to_string = "smallEconomy", serialize = "small-economy", serialize = "small")]
    SmallEconomy,
    #[strum(to_string = "mediumSelectService", serialize = "medium-select-service", serialize = "medium")]
    MediumSelectService,
    #[strum(to_string = "largeFullService", serialize = "large-full-service", serialize = "large")]
    LargeFullService,
    #[strum(to_string = "resortLuxury", serialize = "resort-luxury", serialize = "resort")]
    ResortLuxury,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotelEquipmentProfile {
    pub hvac_kw_per_room: f64,
    pub lighting_plug_kw_per_room: f64,
    pub hot_water_kw_per_room: f64,
    pub elevator_count: u32,
    pub kw_per_elevator: f64,
    pub kitchen_kw: f64,
    pub laundry_kw: f64,
    pub pool_kw: f64,
    pub common_area_kw: f64,
    pub diversity: f64,
    pub peak: PeakRange,
}

impl HotelFacilityType {
    /// Classification used when the wizard did not ask for one.
    pub fn from_room_count(rooms: f64) -> Self {
        if rooms < 75.0 {
            HotelFacilityType::SmallEconomy
        } else if rooms < 200.0 {
            HotelFacilityType::MediumSelectService
        } else if rooms < 500.0 {
            HotelFacilityType::LargeFullService
        } else {
            HotelFacilityType::ResortLuxury
        }
    }

    pub fn profile(self) -> HotelEquipmentProfile {
        match self {
            HotelFacilityType::SmallEconomy => HotelEquipmentProfile {
                hvac_kw_per_room: 1.2,
                lighting_plug_kw_per_room: 0.4,
                hot_water_kw_per_room: 0.4,
                elevator_count: 1,
                kw_per_elevator: 15.0,
                kitchen_kw: 10.0,
                laundry_kw: 20.0,
                pool_kw: 0.0,
                common_area_kw: 8.0,
                diversity: 0.75,
                peak: PeakRange { min_kw: 60.0, max_kw: 200.0 },
            },
            HotelFacilityType::MediumSelectService => HotelEquipmentProfile {
                hvac_kw_per_room: 1.5,
                lighting_plug_kw_per_room: 0.6,
                hot_water_kw_per_room: 0.5,
                elevator_count: 2,
                kw_per_elevator: 20.0,
                kitchen_kw: 60.0,
                laundry_kw: 40.0,
                pool_kw: 15.0,
                common_area_kw: 12.0,
                diversity: 0.75,
                peak: PeakRange { min_kw: 225.0, max_kw: 450.0 },
            },
            HotelFacilityType::LargeFullService => HotelEquipmentProfile {
                hvac_kw_per_room: 2.0,
                lighting_plug_kw_per_room: 0.8,
                hot_water_kw_per_room: 0.7,
                elevator_count: 4,
                kw_per_elevator: 25.0,
                kitchen_kw: 250.0,
                laundry_kw: 120.0,
                pool_kw: 40.0,
                common_area_kw: 80.0,
                diversity: 0.72,
                peak: PeakRange { min_kw: 600.0, max_kw: 2000.0 },
            },
            HotelFacilityType::ResortLuxury => HotelEquipmentProfile {
                hvac_kw_per_room: 2.8,
                lighting_plug_kw_per_room: 1.2,
                hot_water_kw_per_room: 1.0,
                elevator_count: 6,
                kw_per_elevator: 25.0,
                kitchen_kw: 450.0,
                laundry_kw: 200.0,
                pool_kw: 120.0,
                common_area_kw: 200.0,
                diversity: 0.7,
                peak: PeakRange { min_kw: 1200.0, max_kw: 5000.0 },
            },
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum DataCenterClass {
    #[strum(to_string = "edge")]
    Edge,
    #[strum(to_string = "enterprise")]
    Enterprise,
    #[strum(to_string = "colocation", serialize = "colo")]
    Colocation,
    #[strum(to_string = "hyperscale", serialize = "hyperscaler")]
    Hyperscale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataCenterEquipmentProfile {
    /// Cooling load as a fraction of IT load.
    pub cooling_fraction: f64,
    /// UPS and distribution losses as a fraction of IT load.
    pub distribution_loss_fraction: f64,
    pub support_kw: f64,
    pub coincidence: f64,
    pub peak: PeakRange,
}

impl DataCenterClass {
    pub fn from_it_load_kw(it_kw: f64) -> Self {
        if it_kw < 500.0 {
            DataCenterClass::Edge
        } else if it_kw < 5_000.0 {
            DataCenterClass::Enterprise
        } else if it_kw < 30_000.0 {
            DataCenterClass::Colocation
        } else {
            DataCenterClass::Hyperscale
        }
    }

    pub fn profile(self) -> DataCenterEquipmentProfile {
        match self {
            DataCenterClass::Edge => DataCenterEquipmentProfile {
                cooling_fraction: 0.45,
                distribution_loss_fraction: 0.08,
                support_kw: 15.0,
                coincidence: 0.9,
                peak: PeakRange { min_kw: 100.0, max_kw: 1_500.0 },
            },
            DataCenterClass::Enterprise => DataCenterEquipmentProfile {
                cooling_fraction: 0.5,
                distribution_loss_fraction: 0.07,
                support_kw: 50.0,
                coincidence: 0.9,
                peak: PeakRange { min_kw: 500.0, max_kw: 10_000.0 },
            },
            DataCenterClass::Colocation => DataCenterEquipmentProfile {
                cooling_fraction: 0.4,
                distribution_loss_fraction: 0.06,
                support_kw: 150.0,
                coincidence: 0.9,
                peak: PeakRange { min_kw: 2_000.0, max_kw: 40_000.0 },
            },
            DataCenterClass::Hyperscale => DataCenterEquipmentProfile {
                cooling_fraction: 0.25,
                distribution_loss_fraction: 0.04,
                support_kw: 500.0,
                coincidence: 0.9,
                peak: PeakRange { min_kw: 20_000.0, max_kw: 300_000.0 },
            },
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum AirportClass {
    #[strum(to_string = "nonHub", serialize = "non-hub", serialize = "regional")]
    NonHub,
    #[strum(to_string = "smallHub", serialize = "small-hub", serialize = "small")]
    SmallHub,
    #[strum(to_string = "mediumHub", serialize = "medium-hub", serialize = "medium")]
    MediumHub,
    #[strum(to_string = "largeHub", serialize = "large-hub", serialize = "large", serialize = "major")]
    LargeHub,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportEquipmentProfile {
    /// Terminal HVAC plus lighting density.
    pub terminal_w_per_sq_ft: f64,
    /// Jet bridge + pre-conditioned air + 400 Hz ground power, per gate.
    pub kw_per_gate: f64,
    pub baggage_kw_per_million_pax: f64,
    pub airfield_lighting_kw: f64,
    pub default_terminal_sq_ft: f64,
    pub default_gates: f64,
    pub default_passengers_m: f64,
    pub diversity: f64,
    pub peak: PeakRange,
}

impl AirportClass {
    pub fn from_passengers_m(passengers_m: f64) -> Self {
        if passengers_m < 1.0 {
            AirportClass::NonHub
        } else if passengers_m < 5.0 {
            AirportClass::SmallHub
        } else if passengers_m < 15.0 {
            AirportClass::MediumHub
        } else {
            AirportClass::LargeHub
        }
    }

    pub fn profile(self) -> AirportEquipmentProfile {
        match self {
            AirportClass::NonHub => AirportEquipmentProfile {
                terminal_w_per_sq_ft: 12.0,
                kw_per_gate: 180.0,
                baggage_kw_per_million_pax: 150.0,
                airfield_lighting_kw: 150.0,
                default_terminal_sq_ft: 100_000.0,
                default_gates: 5.0,
                default_passengers_m: 0.5,
                diversity: 0.7,
                peak: PeakRange { min_kw: 500.0, max_kw: 3_000.0 },
            },
            AirportClass::SmallHub => AirportEquipmentProfile {
                terminal_w_per_sq_ft: 14.0,
                kw_per_gate: 200.0,
                baggage_kw_per_million_pax: 200.0,
                airfield_lighting_kw: 400.0,
                default_terminal_sq_ft: 400_000.0,
                default_gates: 15.0,
                default_passengers_m: 3.0,
                diversity: 0.7,
                peak: PeakRange { min_kw: 1_500.0, max_kw: 8_000.0 },
            },
            AirportClass::MediumHub => AirportEquipmentProfile {
                terminal_w_per_sq_ft: 16.0,
                kw_per_gate: 220.0,
                baggage_kw_per_million_pax: 250.0,
                airfield_lighting_kw: 800.0,
                default_terminal_sq_ft: 1_000_000.0,
                default_gates: 40.0,
                default_passengers_m: 10.0,
                diversity: 0.7,
                peak: PeakRange { min_kw: 5_000.0, max_kw: 20_000.0 },
            },
            AirportClass::LargeHub => AirportEquipmentProfile {
                terminal_w_per_sq_ft: 18.0,
                kw_per_gate: 250.0,
                baggage_kw_per_million_pax: 300.0,
                airfield_lighting_kw: 1_500.0,
                default_terminal_sq_ft: 3_000_000.0,
                default_gates: 90.0,
                default_passengers_m: 30.0,
                diversity: 0.7,
                peak: PeakRange { min_kw: 12_000.0, max_kw: 80_000.0 },
            },
        }
    }
}
