use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Closed category of a care-providing facility.
///
/// The wire and storage form is the symbolic code written by the data
/// provider (`ARZTPRAXIS`, `APOTHEKE`, ...). Codes are stable across UI
/// languages; clients translate them for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacilityType {
    MedicalPractice,
    Pharmacy,
    CareService,
    Hospital,
    MedicalSupplyStore,
    OutpatientCareService,
    InpatientCareFacility,
    ShortTermCareFacility,
    TherapyPractice,
    CounselingCenter,
    Other,
}

impl FacilityType {
    /// Every facility type, in declaration order.
    pub const ALL: [FacilityType; 11] = [
        FacilityType::MedicalPractice,
        FacilityType::Pharmacy,
        FacilityType::CareService,
        FacilityType::Hospital,
        FacilityType::MedicalSupplyStore,
        FacilityType::OutpatientCareService,
        FacilityType::InpatientCareFacility,
        FacilityType::ShortTermCareFacility,
        FacilityType::TherapyPractice,
        FacilityType::CounselingCenter,
        FacilityType::Other,
    ];

    /// Symbolic code as stored and serialized.
    pub fn code(&self) -> &'static str {
        match self {
            FacilityType::MedicalPractice => "ARZTPRAXIS",
            FacilityType::Pharmacy => "APOTHEKE",
            FacilityType::CareService => "PFLEGE",
            FacilityType::Hospital => "KRANKENHAUS",
            FacilityType::MedicalSupplyStore => "SANITAETSHAUS",
            FacilityType::OutpatientCareService => "AMBULANTER_PFLEGEDIENST",
            FacilityType::InpatientCareFacility => "STATIONAERE_PFLEGE",
            FacilityType::ShortTermCareFacility => "KURZZEITPFLEGE",
            FacilityType::TherapyPractice => "THERAPIE",
            FacilityType::CounselingCenter => "BERATUNGSSTELLE",
            FacilityType::Other => "SONSTIGES",
        }
    }

    /// English snake-case name, accepted as an alternative spelling on input.
    pub fn english_name(&self) -> &'static str {
        match self {
            FacilityType::MedicalPractice => "medical_practice",
            FacilityType::Pharmacy => "pharmacy",
            FacilityType::CareService => "care_service",
            FacilityType::Hospital => "hospital",
            FacilityType::MedicalSupplyStore => "medical_supply_store",
            FacilityType::OutpatientCareService => "outpatient_care_service",
            FacilityType::InpatientCareFacility => "inpatient_care_facility",
            FacilityType::ShortTermCareFacility => "short_term_care_facility",
            FacilityType::TherapyPractice => "therapy_practice",
            FacilityType::CounselingCenter => "counseling_center",
            FacilityType::Other => "other",
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FacilityType {
    type Err = CoreError;

    /// Parses a code or English name, ignoring case and treating `-` and
    /// spaces as `_`. Umlaut spellings of the codes are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_uppercase()
            .replace(['-', ' '], "_")
            .replace('Ä', "AE");

        FacilityType::ALL
            .into_iter()
            .find(|t| {
                t.code() == normalized || t.english_name().eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| CoreError::invalid_facility_type(s))
    }
}

impl Serialize for FacilityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for FacilityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
