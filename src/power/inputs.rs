//! Typed per-industry inputs and the normalization step that builds them from
//! loose wizard answers.
//!
//! Normalization is lenient (aliases, string numbers, per-type defaults); the
//! estimators behind it only ever see typed values.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use super::benchmarks::{
    self, AgricultureType, AirportClass, CarWashType, DataCenterClass, DataCenterTier, HospitalType, HotelClass,
    HotelFacilityType, ManufacturingType,
};
use super::estimators::{self, AirportEquipmentInput, CarWashEquipmentInput, DataCenterEquipmentInput, HotelEquipmentInput};
use super::fields::{self, FieldSpec};
use crate::domain::{FacilityAttributes, PowerCalculationResult};

/// Canonical facility types. Parsing accepts every historical slug alias.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum FacilityType {
    #[strum(to_string = "office", serialize = "office-building", serialize = "corporate-office", serialize = "commercial-office")]
    Office,
    #[strum(to_string = "hotel", serialize = "hotel-hospitality", serialize = "hospitality", serialize = "motel", serialize = "resort")]
    Hotel,
    #[strum(to_string = "hospital", serialize = "healthcare", serialize = "medical-center", serialize = "hospital-healthcare")]
    Hospital,
    #[strum(to_string = "senior-living", serialize = "assisted-living", serialize = "nursing-home")]
    SeniorLiving,
    #[strum(
        to_string = "data-center",
        serialize = "datacenter",
        serialize = "data-centre",
        serialize = "edge-data-center",
        serialize = "colocation"
    )]
    DataCenter,
    #[strum(to_string = "airport", serialize = "aviation")]
    Airport,
    #[strum(to_string = "car-wash", serialize = "carwash", serialize = "auto-wash")]
    CarWash,
    #[strum(to_string = "manufacturing", serialize = "factory", serialize = "industrial", serialize = "manufacturing-plant")]
    Manufacturing,
    #[strum(
        to_string = "warehouse",
        serialize = "logistics",
        serialize = "distribution-center",
        serialize = "logistics-center",
        serialize = "fulfillment-center"
    )]
    Warehouse,
    #[strum(to_string = "cold-storage", serialize = "refrigerated-warehouse")]
    ColdStorage,
    #[strum(to_string = "retail", serialize = "retail-store", serialize = "store")]
    Retail,
    #[strum(to_string = "shopping-center", serialize = "shopping-mall", serialize = "mall")]
    ShoppingCenter,
    #[strum(to_string = "restaurant", serialize = "food-service")]
    Restaurant,
    #[strum(to_string = "grocery", serialize = "supermarket", serialize = "grocery-store")]
    Grocery,
    #[strum(to_string = "casino", serialize = "gaming", serialize = "tribal-casino")]
    Casino,
    #[strum(
        to_string = "indoor-farm",
        serialize = "vertical-farm",
        serialize = "indoor-agriculture",
        serialize = "cannabis-cultivation"
    )]
    IndoorFarm,
    #[strum(to_string = "agriculture", serialize = "agricultural", serialize = "farm", serialize = "farming")]
    Agriculture,
    #[strum(
        to_string = "apartment",
        serialize = "apartments",
        serialize = "multifamily",
        serialize = "apartment-complex",
        serialize = "residential"
    )]
    Apartment,
    #[strum(to_string = "college", serialize = "university", serialize = "college-university", serialize = "campus")]
    College,
    #[strum(to_string = "school", serialize = "k12", serialize = "k-12", serialize = "k-12-school")]
    School,
    #[strum(to_string = "gas-station", serialize = "fuel-station", serialize = "convenience-store", serialize = "truck-stop")]
    GasStation,
    #[strum(to_string = "government", serialize = "public-building", serialize = "municipal", serialize = "government-public")]
    Government,
    #[strum(
        to_string = "ev-charging",
        serialize = "ev-charging-hub",
        serialize = "ev-charging-station",
        serialize = "ev-hub"
    )]
    EvCharging,
    #[strum(to_string = "fitness-center", serialize = "gym", serialize = "fitness")]
    FitnessCenter,
    #[strum(to_string = "laboratory", serialize = "lab", serialize = "research-lab")]
    Laboratory,
    #[strum(to_string = "stadium", serialize = "arena", serialize = "event-venue")]
    Stadium,
    #[strum(to_string = "water-treatment", serialize = "wastewater", serialize = "water-utility")]
    WaterTreatment,
    #[strum(to_string = "parking-garage", serialize = "parking", serialize = "parking-structure")]
    ParkingGarage,
}

impl FacilityType {
    /// Resolve a wizard slug, tolerating case, underscores and spaces.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let normalized: String = slug
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        normalized.parse().ok()
    }

    pub fn slug(self) -> &'static str {
        self.into()
    }
}

// ============================================================================
// Per-type defaults (applied when the wizard answer is missing or unusable)
// ============================================================================

mod defaults {
    pub const OFFICE_SQ_FT: f64 = 50_000.0;
    pub const RETAIL_SQ_FT: f64 = 20_000.0;
    pub const SHOPPING_CENTER_SQ_FT: f64 = 200_000.0;
    pub const RESTAURANT_SQ_FT: f64 = 5_000.0;
    pub const GROCERY_SQ_FT: f64 = 40_000.0;
    pub const WAREHOUSE_SQ_FT: f64 = 100_000.0;
    pub const COLD_STORAGE_SQ_FT: f64 = 50_000.0;
    pub const MANUFACTURING_SQ_FT: f64 = 100_000.0;
    pub const GOVERNMENT_SQ_FT: f64 = 50_000.0;
    pub const SCHOOL_SQ_FT: f64 = 100_000.0;
    pub const FITNESS_SQ_FT: f64 = 30_000.0;
    pub const LABORATORY_SQ_FT: f64 = 40_000.0;
    pub const CASINO_GAMING_SQ_FT: f64 = 50_000.0;
    /// Share of total casino floor area that is gaming floor.
    pub const CASINO_GAMING_SHARE: f64 = 0.4;
    pub const HOTEL_ROOMS: f64 = 150.0;
    pub const HOSPITAL_BEDS: f64 = 200.0;
    pub const SENIOR_LIVING_BEDS: f64 = 100.0;
    /// 2 MW IT load.
    pub const DATA_CENTER_IT_KW: f64 = 2_000.0;
    pub const AIRPORT_PASSENGERS_M: f64 = 5.0;
    pub const CAR_WASH_BAYS: f64 = 1.0;
    pub const INDOOR_FARM_SQ_FT: f64 = 20_000.0;
    pub const AGRICULTURE_ACRES: f64 = 500.0;
    pub const APARTMENT_UNITS: f64 = 100.0;
    pub const COLLEGE_STUDENTS: f64 = 5_000.0;
    pub const STADIUM_SEATS: f64 = 20_000.0;
    pub const GAS_STATION_PUMPS: f64 = 8.0;
    pub const GAS_STATION_STORE_SQ_FT: f64 = 3_000.0;
    pub const EV_LEVEL2: f64 = 8.0;
    pub const EV_DCFC: f64 = 4.0;
    pub const WATER_TREATMENT_MGD: f64 = 5.0;
    pub const PARKING_SQ_FT: f64 = 150_000.0;
    pub const GENERIC_SQ_FT: f64 = 10_000.0;
}

/// Typed, normalized inputs for one facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum FacilityInputs {
    /// W/sq ft industries (office, retail, warehouse, ...).
    Area { facility: FacilityType, square_feet: f64 },
    Hotel { room_count: f64, hotel_class: HotelClass },
    HotelEquipment(HotelEquipmentInput),
    Hospital { bed_count: f64, hospital_type: HospitalType },
    SeniorLiving { bed_count: f64 },
    DataCenter { it_load_kw: f64, tier: DataCenterTier },
    DataCenterEquipment(DataCenterEquipmentInput),
    Airport { annual_passengers_millions: f64 },
    AirportEquipment(AirportEquipmentInput),
    CarWash { bay_count: f64, car_wash_type: CarWashType },
    CarWashEquipment(CarWashEquipmentInput),
    Manufacturing { square_feet: f64, manufacturing_type: ManufacturingType },
    Casino { gaming_floor_sq_ft: f64 },
    IndoorFarm { growing_area_sq_ft: f64, led_watts_per_sq_ft: f64 },
    Agriculture { acreage: f64, farm_type: AgricultureType },
    Apartment { unit_count: f64 },
    College { student_count: f64 },
    Stadium { seat_count: f64 },
    GasStation { fuel_pumps: f64, store_sq_ft: f64 },
    EvCharging { level2: f64, dcfc: f64, hpc: f64 },
    WaterTreatment { flow_mgd: f64 },
    ParkingGarage { square_feet: f64, ev_ports: f64 },
    Generic { square_feet: f64 },
}

fn sq_ft_or(attrs: &FacilityAttributes, default: f64) -> f64 {
    fields::SQUARE_FEET.number_or(attrs, default)
}

fn wants_equipment_model(attrs: &FacilityAttributes) -> bool {
    fields::USE_EQUIPMENT_MODEL.flag(attrs).unwrap_or(false)
}

/// Passenger answers arrive either in millions (`5`) or as a raw count
/// (`5,000,000`). Anything above 1,000 is treated as a raw count.
fn passengers_millions(raw: f64) -> f64 {
    if raw > 1_000.0 {
        raw / 1_000_000.0
    } else {
        raw
    }
}

fn optional(spec: &FieldSpec, attrs: &FacilityAttributes) -> Option<f64> {
    spec.number(attrs)
}

impl FacilityInputs {
    /// Build typed inputs for a facility type (`None` = unrecognized slug).
    pub fn normalize(facility: Option<FacilityType>, attrs: &FacilityAttributes) -> Self {
        use FacilityType as F;

        let Some(facility) = facility else {
            return FacilityInputs::Generic { square_feet: sq_ft_or(attrs, defaults::GENERIC_SQ_FT) };
        };
        let area = |default: f64| FacilityInputs::Area { facility, square_feet: sq_ft_or(attrs, default) };
        let equipment = wants_equipment_model(attrs);

        match facility {
            F::Office => area(defaults::OFFICE_SQ_FT),
            F::Retail => area(defaults::RETAIL_SQ_FT),
            F::ShoppingCenter => area(defaults::SHOPPING_CENTER_SQ_FT),
            F::Restaurant => area(defaults::RESTAURANT_SQ_FT),
            F::Grocery => area(defaults::GROCERY_SQ_FT),
            F::Warehouse => area(defaults::WAREHOUSE_SQ_FT),
            F::ColdStorage => area(defaults::COLD_STORAGE_SQ_FT),
            F::Government => area(defaults::GOVERNMENT_SQ_FT),
            F::School => area(defaults::SCHOOL_SQ_FT),
            F::FitnessCenter => area(defaults::FITNESS_SQ_FT),
            F::Laboratory => area(defaults::LABORATORY_SQ_FT),

            F::Hotel => {
                let room_count = fields::ROOM_COUNT.number_or(attrs, defaults::HOTEL_ROOMS);
                let facility_type: Option<HotelFacilityType> = fields::HOTEL_FACILITY_TYPE.parse(attrs);
                if equipment || facility_type.is_some() {
                    FacilityInputs::HotelEquipment(HotelEquipmentInput { room_count, facility_type })
                } else {
                    FacilityInputs::Hotel { room_count, hotel_class: fields::HOTEL_CLASS.parse_or_default(attrs) }
                }
            }
            F::Hospital => FacilityInputs::Hospital {
                bed_count: fields::BED_COUNT.number_or(attrs, defaults::HOSPITAL_BEDS),
                hospital_type: fields::HOSPITAL_TYPE.parse_or_default(attrs),
            },
            F::SeniorLiving => FacilityInputs::SeniorLiving {
                bed_count: fields::BED_COUNT.number_or(attrs, defaults::SENIOR_LIVING_BEDS),
            },
            F::DataCenter => {
                let it_load_kw = data_center_it_kw(attrs);
                let class: Option<DataCenterClass> = fields::DATA_CENTER_CLASS.parse(attrs);
                if equipment || class.is_some() {
                    FacilityInputs::DataCenterEquipment(DataCenterEquipmentInput {
                        it_load_kw,
                        data_center_class: class,
                    })
                } else {
                    FacilityInputs::DataCenter {
                        it_load_kw,
                        tier: fields::DATA_CENTER_TIER
                            .resolve(attrs, DataCenterTier::from_answer)
                            .unwrap_or_default(),
                    }
                }
            }
            F::Airport => {
                let passengers = optional(&fields::ANNUAL_PASSENGERS, attrs).map(passengers_millions);
                let terminal_sq_ft = optional(&fields::TERMINAL_SQ_FT, attrs);
                let gate_count = optional(&fields::GATE_COUNT, attrs);
                let airport_class: Option<AirportClass> = fields::AIRPORT_CLASS.parse(attrs);
                if equipment || terminal_sq_ft.is_some() || gate_count.is_some() || airport_class.is_some() {
                    FacilityInputs::AirportEquipment(AirportEquipmentInput {
                        annual_passengers_millions: passengers,
                        terminal_sq_ft,
                        gate_count,
                        airport_class,
                    })
                } else {
                    FacilityInputs::Airport {
                        annual_passengers_millions: passengers.unwrap_or(defaults::AIRPORT_PASSENGERS_M),
                    }
                }
            }
            F::CarWash => {
                let bay_count = fields::BAY_COUNT.number_or(attrs, defaults::CAR_WASH_BAYS);
                let car_wash_type = fields::CAR_WASH_TYPE.parse_or_default(attrs);
                if equipment {
                    FacilityInputs::CarWashEquipment(CarWashEquipmentInput { bay_count, car_wash_type })
                } else {
                    FacilityInputs::CarWash { bay_count, car_wash_type }
                }
            }
            F::Manufacturing => FacilityInputs::Manufacturing {
                square_feet: sq_ft_or(attrs, defaults::MANUFACTURING_SQ_FT),
                manufacturing_type: fields::MANUFACTURING_TYPE.parse_or_default(attrs),
            },
            F::Casino => {
                let gaming_floor_sq_ft = optional(&fields::GAMING_FLOOR_SQ_FT, attrs)
                    .or_else(|| fields::SQUARE_FEET.number(attrs).map(|total| total * defaults::CASINO_GAMING_SHARE))
                    .unwrap_or(defaults::CASINO_GAMING_SQ_FT);
                FacilityInputs::Casino { gaming_floor_sq_ft }
            }
            F::IndoorFarm => FacilityInputs::IndoorFarm {
                growing_area_sq_ft: fields::GROWING_AREA_SQ_FT
                    .number(attrs)
                    .unwrap_or_else(|| sq_ft_or(attrs, defaults::INDOOR_FARM_SQ_FT)),
                led_watts_per_sq_ft: fields::LED_WATTS_PER_SQ_FT
                    .number_or(attrs, benchmarks::INDOOR_FARM_DEFAULT_LED_W_PER_SQ_FT),
            },
            F::Agriculture => FacilityInputs::Agriculture {
                acreage: fields::ACREAGE.number_or(attrs, defaults::AGRICULTURE_ACRES),
                farm_type: fields::AGRICULTURE_TYPE.parse_or_default(attrs),
            },
            F::Apartment => FacilityInputs::Apartment {
                unit_count: fields::UNIT_COUNT.number_or(attrs, defaults::APARTMENT_UNITS),
            },
            F::College => FacilityInputs::College {
                student_count: fields::STUDENT_COUNT.number_or(attrs, defaults::COLLEGE_STUDENTS),
            },
            F::Stadium => FacilityInputs::Stadium {
                seat_count: fields::SEAT_COUNT.number_or(attrs, defaults::STADIUM_SEATS),
            },
            F::GasStation => FacilityInputs::GasStation {
                fuel_pumps: fields::PUMP_COUNT.number_or(attrs, defaults::GAS_STATION_PUMPS),
                store_sq_ft: fields::STORE_SQ_FT.number_or(attrs, defaults::GAS_STATION_STORE_SQ_FT),
            },
            F::EvCharging => {
                let level2 = optional(&fields::LEVEL2_CHARGERS, attrs);
                let dcfc = optional(&fields::DCFC_CHARGERS, attrs);
                let hpc = optional(&fields::HPC_CHARGERS, attrs);
                // Any explicit charger count means the others are genuinely zero.
                if level2.is_none() && dcfc.is_none() && hpc.is_none() {
                    FacilityInputs::EvCharging { level2: defaults::EV_LEVEL2, dcfc: defaults::EV_DCFC, hpc: 0.0 }
                } else {
                    FacilityInputs::EvCharging {
                        level2: level2.unwrap_or(0.0),
                        dcfc: dcfc.unwrap_or(0.0),
                        hpc: hpc.unwrap_or(0.0),
                    }
                }
            }
            F::WaterTreatment => FacilityInputs::WaterTreatment {
                flow_mgd: fields::FLOW_MGD.number_or(attrs, defaults::WATER_TREATMENT_MGD),
            },
            F::ParkingGarage => FacilityInputs::ParkingGarage {
                square_feet: sq_ft_or(attrs, defaults::PARKING_SQ_FT),
                ev_ports: fields::EV_PORTS.number_or(attrs, 0.0),
            },
        }
    }

    /// Run the matching estimator.
    pub fn estimate(&self) -> PowerCalculationResult {
        use FacilityType as F;

        match *self {
            FacilityInputs::Area { facility, square_feet } => match facility {
                F::Office => estimators::calculate_office_power(square_feet),
                F::Retail => estimators::calculate_retail_power(square_feet),
                F::ShoppingCenter => estimators::calculate_shopping_center_power(square_feet),
                F::Restaurant => estimators::calculate_restaurant_power(square_feet),
                F::Grocery => estimators::calculate_grocery_power(square_feet),
                F::Warehouse => estimators::calculate_warehouse_power(square_feet),
                F::ColdStorage => estimators::calculate_cold_storage_power(square_feet),
                F::Government => estimators::calculate_government_power(square_feet),
                F::School => estimators::calculate_school_power(square_feet),
                F::FitnessCenter => estimators::calculate_fitness_center_power(square_feet),
                F::Laboratory => estimators::calculate_laboratory_power(square_feet),
                _ => estimators::calculate_generic_power(square_feet),
            },
            FacilityInputs::Hotel { room_count, hotel_class } => estimators::calculate_hotel_power(room_count, hotel_class),
            FacilityInputs::HotelEquipment(input) => estimators::calculate_hotel_power_from_equipment(input),
            FacilityInputs::Hospital { bed_count, hospital_type } => {
                estimators::calculate_hospital_power(bed_count, hospital_type)
            }
            FacilityInputs::SeniorLiving { bed_count } => estimators::calculate_senior_living_power(bed_count),
            FacilityInputs::DataCenter { it_load_kw, tier } => estimators::calculate_data_center_power(it_load_kw, tier),
            FacilityInputs::DataCenterEquipment(input) => estimators::calculate_data_center_power_from_equipment(input),
            FacilityInputs::Airport { annual_passengers_millions } => {
                estimators::calculate_airport_power(annual_passengers_millions)
            }
            FacilityInputs::AirportEquipment(input) => estimators::calculate_airport_power_from_equipment(input),
            FacilityInputs::CarWash { bay_count, car_wash_type } => {
                estimators::calculate_car_wash_power(bay_count, car_wash_type)
            }
            FacilityInputs::CarWashEquipment(input) => estimators::calculate_car_wash_power_from_equipment(input),
            FacilityInputs::Manufacturing { square_feet, manufacturing_type } => {
                estimators::calculate_manufacturing_power(square_feet, manufacturing_type)
            }
            FacilityInputs::Casino { gaming_floor_sq_ft } => estimators::calculate_casino_power(gaming_floor_sq_ft),
            FacilityInputs::IndoorFarm { growing_area_sq_ft, led_watts_per_sq_ft } => {
                estimators::calculate_indoor_farm_power(growing_area_sq_ft, led_watts_per_sq_ft)
            }
            FacilityInputs::Agriculture { acreage, farm_type } => estimators::calculate_agriculture_power(acreage, farm_type),
            FacilityInputs::Apartment { unit_count } => estimators::calculate_apartment_power(unit_count),
            FacilityInputs::College { student_count } => estimators::calculate_college_power(student_count),
            FacilityInputs::Stadium { seat_count } => estimators::calculate_stadium_power(seat_count),
            FacilityInputs::GasStation { fuel_pumps, store_sq_ft } => {
                estimators::calculate_gas_station_power(fuel_pumps, store_sq_ft)
            }
            FacilityInputs::EvCharging { level2, dcfc, hpc } => estimators::calculate_ev_charging_power(level2, dcfc, hpc),
            FacilityInputs::WaterTreatment { flow_mgd } => estimators::calculate_water_treatment_power(flow_mgd),
            FacilityInputs::ParkingGarage { square_feet, ev_ports } => {
                estimators::calculate_parking_garage_power(square_feet, ev_ports)
            }
            FacilityInputs::Generic { square_feet } => estimators::calculate_generic_power(square_feet),
        }
    }
}

/// IT load resolution order: explicit kW, explicit MW, racks × density, default.
fn data_center_it_kw(attrs: &FacilityAttributes) -> f64 {
    if let Some(kw) = fields::IT_LOAD_KW.number(attrs) {
        return kw;
    }
    if let Some(mw) = fields::IT_LOAD_MW.number(attrs) {
        return mw * 1000.0;
    }
    if let Some(racks) = fields::RACK_COUNT.number(attrs) {
        let kw_per_rack = fields::KW_PER_RACK.number_or(attrs, benchmarks::DATA_CENTER_KW_PER_RACK);
        return racks * kw_per_rack;
    }
    defaults::DATA_CENTER_IT_KW
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{round2, FieldValue};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slug_aliases_resolve_to_one_type() {
        assert_eq!(FacilityType::from_slug("edge-data-center"), Some(FacilityType::DataCenter));
        assert_eq!(FacilityType::from_slug("Data_Center"), Some(FacilityType::DataCenter));
        assert_eq!(FacilityType::from_slug("hotel-hospitality"), Some(FacilityType::Hotel));
        assert_eq!(FacilityType::from_slug(" EV Charging Hub "), Some(FacilityType::EvCharging));
        assert_eq!(FacilityType::from_slug("college-university"), Some(FacilityType::College));
        assert_eq!(FacilityType::from_slug("spaceport"), None);
    }

    #[test]
    fn test_canonical_slug_round_trips() {
        for ft in FacilityType::iter() {
            assert_eq!(FacilityType::from_slug(ft.slug()), Some(ft));
            assert_eq!(ft.to_string(), ft.slug());
        }
    }

    #[test]
    fn test_hotel_defaults() {
        let inputs = FacilityInputs::normalize(Some(FacilityType::Hotel), &FacilityAttributes::new());
        assert_eq!(inputs, FacilityInputs::Hotel { room_count: 150.0, hotel_class: HotelClass::Midscale });
    }

    #[test]
    fn test_hotel_facility_type_selects_equipment_model() {
        let attrs = FacilityAttributes::new()
            .with("numberOfRooms", "133")
            .with("facilityType", "mediumSelectService");
        let inputs = FacilityInputs::normalize(Some(FacilityType::Hotel), &attrs);
        assert_eq!(
            inputs,
            FacilityInputs::HotelEquipment(HotelEquipmentInput {
                room_count: 133.0,
                facility_type: Some(HotelFacilityType::MediumSelectService),
            })
        );
    }

    #[test]
    fn test_data_center_it_load_resolution() {
        let by_racks = FacilityAttributes::new().with("rackCount", 100).with("kwPerRack", 12);
        assert_eq!(data_center_it_kw(&by_racks), 1_200.0);

        let by_mw = FacilityAttributes::new().with("capacityMW", 5).with("rackCount", 10);
        assert_eq!(data_center_it_kw(&by_mw), 5_000.0);

        assert_eq!(data_center_it_kw(&FacilityAttributes::new()), 2_000.0);
    }

    #[rstest]
    #[case::number(FieldValue::Number(4.0), DataCenterTier::Tier4)]
    #[case::numeric_text(FieldValue::from("4"), DataCenterTier::Tier4)]
    #[case::spaced(FieldValue::from("Tier 4"), DataCenterTier::Tier4)]
    #[case::underscored(FieldValue::from("tier_4"), DataCenterTier::Tier4)]
    #[case::hyphenated(FieldValue::from("tier-4"), DataCenterTier::Tier4)]
    #[case::roman(FieldValue::from("Tier IV"), DataCenterTier::Tier4)]
    #[case::bare_roman(FieldValue::from("iv"), DataCenterTier::Tier4)]
    #[case::tier_one_number(FieldValue::Number(1.0), DataCenterTier::Tier1)]
    #[case::tier_one_text(FieldValue::from("TIER_1"), DataCenterTier::Tier1)]
    #[case::unrecognised(FieldValue::from("tier 5"), DataCenterTier::Tier3)]
    #[case::fractional(FieldValue::Number(3.5), DataCenterTier::Tier3)]
    fn test_data_center_tier_answer_forms(#[case] answer: FieldValue, #[case] expected: DataCenterTier) {
        let attrs = FacilityAttributes::new().with("itLoadKW", 1_000).with("tier", answer);
        let inputs = FacilityInputs::normalize(Some(FacilityType::DataCenter), &attrs);
        assert_eq!(inputs, FacilityInputs::DataCenter { it_load_kw: 1_000.0, tier: expected });
        assert_eq!(inputs.estimate().power_mw, round2(1.0 * expected.pue()));
    }

    #[test]
    fn test_data_center_tier_alias_fallthrough() {
        let attrs = FacilityAttributes::new()
            .with("tier", "unknown")
            .with("uptimeTier", 2);
        assert_eq!(
            fields::DATA_CENTER_TIER.resolve(&attrs, DataCenterTier::from_answer),
            Some(DataCenterTier::Tier2)
        );
    }

    #[test]
    fn test_airport_raw_passenger_count_is_scaled() {
        let attrs = FacilityAttributes::new().with("annualPassengers", "12,000,000");
        let inputs = FacilityInputs::normalize(Some(FacilityType::Airport), &attrs);
        assert_eq!(inputs, FacilityInputs::Airport { annual_passengers_millions: 12.0 });
    }

    #[test]
    fn test_ev_charging_partial_answers_zero_the_rest() {
        let attrs = FacilityAttributes::new().with("dcfcChargers", 6);
        let inputs = FacilityInputs::normalize(Some(FacilityType::EvCharging), &attrs);
        assert_eq!(inputs, FacilityInputs::EvCharging { level2: 0.0, dcfc: 6.0, hpc: 0.0 });
    }

    #[test]
    fn test_casino_derives_gaming_floor_from_total_area() {
        let attrs = FacilityAttributes::new().with("squareFeet", 200_000);
        let inputs = FacilityInputs::normalize(Some(FacilityType::Casino), &attrs);
        assert_eq!(inputs, FacilityInputs::Casino { gaming_floor_sq_ft: 80_000.0 });
    }

    #[test]
    fn test_unknown_type_is_generic() {
        let inputs = FacilityInputs::normalize(None, &FacilityAttributes::new().with("facilitySize", 30_000));
        assert_eq!(inputs, FacilityInputs::Generic { square_feet: 30_000.0 });
    }

    #[test]
    fn test_equipment_flag_accepts_text() {
        let attrs = FacilityAttributes::new().with("useEquipmentModel", "yes").with("bayCount", 2);
        let inputs = FacilityInputs::normalize(Some(FacilityType::CarWash), &attrs);
        assert!(matches!(inputs, FacilityInputs::CarWashEquipment(_)));
    }
}
