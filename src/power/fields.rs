//! Field-name reconciliation for wizard answers.
//!
//! A logical quantity (square footage, room count, ...) has been collected under
//! different key names over the life of the wizard. Each [`FieldSpec`] lists the
//! accepted keys in priority order; resolution takes the first key holding a
//! usable value.

use crate::domain::{FacilityAttributes, FieldValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical name, used when echoing inputs.
    pub name: &'static str,
    /// Accepted keys in priority order. The canonical name comes first.
    pub aliases: &'static [&'static str],
}

macro_rules! field {
    ($ident:ident, $name:literal $(, $alias:literal)* $(,)?) => {
        pub const $ident: FieldSpec = FieldSpec { name: $name, aliases: &[$name $(, $alias)*] };
    };
}

field!(SQUARE_FEET, "squareFeet", "squareFootage", "facilitySize", "buildingSqFt", "sqFt", "totalSqFt", "buildingSize");
field!(ROOM_COUNT, "roomCount", "numberOfRooms", "rooms", "numRooms", "hotelRooms");
field!(HOTEL_CLASS, "hotelClass", "hotelCategory", "propertyClass", "hotelType");
field!(HOTEL_FACILITY_TYPE, "facilityType", "hotelFacilityType", "propertyType");
field!(BED_COUNT, "bedCount", "numberOfBeds", "beds", "licensedBeds", "numBeds");
field!(HOSPITAL_TYPE, "hospitalType", "facilityType", "hospitalCategory");
field!(IT_LOAD_KW, "itLoadKW", "itLoad", "itLoadKw", "criticalLoadKW");
field!(IT_LOAD_MW, "itLoadMW", "capacityMW", "dataCenterMW", "itCapacityMW");
field!(RACK_COUNT, "rackCount", "numberOfRacks", "racks", "numRacks");
field!(KW_PER_RACK, "kwPerRack", "rackDensity", "powerPerRack", "rackDensityKW");
field!(DATA_CENTER_TIER, "tier", "dataCenterTier", "uptimeTier", "tierClassification");
field!(DATA_CENTER_CLASS, "dataCenterClass", "dataCenterType", "facilityClass");
field!(ANNUAL_PASSENGERS, "annualPassengers", "passengersPerYear", "annualPassengerCount", "passengers");
field!(TERMINAL_SQ_FT, "terminalSqFt", "terminalSquareFeet", "terminalSize");
field!(GATE_COUNT, "gateCount", "numberOfGates", "gates");
field!(AIRPORT_CLASS, "airportClass", "airportType", "hubClass");
field!(BAY_COUNT, "bayCount", "numberOfBays", "bays", "tunnelCount", "washBays");
field!(CAR_WASH_TYPE, "carWashType", "washType", "facilityType");
field!(MANUFACTURING_TYPE, "manufacturingType", "industryType", "processType");
field!(GAMING_FLOOR_SQ_FT, "gamingFloorSqFt", "gamingFloorSize", "gamingSqFt", "casinoFloorSqFt");
field!(GROWING_AREA_SQ_FT, "growingAreaSqFt", "canopySqFt", "growingArea", "cultivationSqFt");
field!(LED_WATTS_PER_SQ_FT, "ledWattsPerSqFt", "lightingDensity", "lightingWattsPerSqFt");
field!(ACREAGE, "acreage", "acres", "farmSize", "totalAcres");
field!(AGRICULTURE_TYPE, "farmType", "agricultureType", "operationType");
field!(UNIT_COUNT, "unitCount", "numberOfUnits", "units", "apartmentUnits", "numUnits");
field!(STUDENT_COUNT, "studentCount", "enrollment", "numberOfStudents", "students");
field!(SEAT_COUNT, "seatCount", "capacity", "seatingCapacity", "seats");
field!(PUMP_COUNT, "fuelPumps", "pumpCount", "numberOfPumps", "dispensers");
field!(STORE_SQ_FT, "storeSqFt", "convenienceStoreSqFt", "cStoreSqFt");
field!(LEVEL2_CHARGERS, "level2Chargers", "numberOfLevel2Chargers", "l2Chargers", "level2Count");
field!(DCFC_CHARGERS, "dcfcChargers", "numberOfDCFastChargers", "dcFastChargers", "dcfcCount");
field!(HPC_CHARGERS, "hpcChargers", "numberOfHPCChargers", "ultraFastChargers", "hpcCount");
field!(EV_PORTS, "evPorts", "evChargingPorts", "evChargers");
field!(FLOW_MGD, "flowMGD", "capacityMGD", "dailyFlowMGD", "treatmentCapacity");
field!(OPERATING_HOURS, "operatingHours", "hoursPerDay", "dailyOperatingHours");
field!(PEAK_LOAD_MW, "peakLoad", "peakDemandMW", "peakLoadMW");
field!(GRID_CONNECTION, "gridConnection", "gridReliability", "gridQuality");
field!(GRID_CAPACITY_MW, "gridCapacity", "gridCapacityMW");
field!(USE_EQUIPMENT_MODEL, "useEquipmentModel", "equipmentBased", "detailedCalculation");

impl FieldSpec {
    /// First alias holding a finite, non-zero number.
    ///
    /// Zero counts as "not answered": the wizard pre-fills numeric questions
    /// with 0 when the user skips them.
    pub fn number(&self, attrs: &FacilityAttributes) -> Option<f64> {
        self.aliases
            .iter()
            .filter_map(|key| attrs.get(key).and_then(FieldValue::as_number))
            .find(|v| *v != 0.0)
    }

    /// Resolved number or the documented default.
    pub fn number_or(&self, attrs: &FacilityAttributes, default: f64) -> f64 {
        self.number(attrs).unwrap_or(default)
    }

    /// First alias holding non-empty text.
    pub fn text<'a>(&self, attrs: &'a FacilityAttributes) -> Option<&'a str> {
        self.aliases
            .iter()
            .find_map(|key| attrs.get(key).and_then(FieldValue::as_text))
    }

    /// First alias holding a yes/no answer.
    pub fn flag(&self, attrs: &FacilityAttributes) -> Option<bool> {
        self.aliases
            .iter()
            .find_map(|key| attrs.get(key).and_then(FieldValue::as_flag))
    }

    /// Parse the first text alias into an enum, falling back to `T::default()`.
    pub fn parse_or_default<T>(&self, attrs: &FacilityAttributes) -> T
    where
        T: std::str::FromStr + Default,
    {
        self.parse(attrs).unwrap_or_default()
    }

    /// First alias whose value `f` accepts.
    pub fn resolve<T>(&self, attrs: &FacilityAttributes, f: impl Fn(&FieldValue) -> Option<T>) -> Option<T> {
        self.aliases.iter().filter_map(|key| attrs.get(key)).find_map(f)
    }

    /// Parse the first text alias that names a known variant.
    pub fn parse<T: std::str::FromStr>(&self, attrs: &FacilityAttributes) -> Option<T> {
        self.aliases
            .iter()
            .filter_map(|key| attrs.get(key).and_then(FieldValue::as_text))
            .find_map(|s| s.parse().ok())
    }
}
