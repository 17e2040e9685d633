use caremap_core::{DoctorId, Facility, FacilityId, FacilityType};
use caremap_storage::DoctorRecord;
use serde::{Deserialize, Serialize};

/// A doctor flattened together with the facility it works at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorListItem {
    pub doctor_id: DoctorId,
    pub name: String,
    pub specialty: Option<String>,
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_type: FacilityType,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub wheelchair_accessible: Option<bool>,
}

impl From<DoctorRecord> for DoctorListItem {
    fn from(record: DoctorRecord) -> Self {
        let DoctorRecord { doctor, facility } = record;
        Self {
            doctor_id: doctor.id,
            name: doctor.name,
            specialty: doctor.specialty,
            facility_id: facility.id,
            facility_name: facility.name,
            facility_type: facility.facility_type,
            street: facility.street,
            postal_code: facility.postal_code,
            city: facility.city,
            phone: facility.phone,
            latitude: facility.latitude,
            longitude: facility.longitude,
            wheelchair_accessible: facility.wheelchair_accessible,
        }
    }
}

/// Every stored facility field, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityView {
    pub id: FacilityId,
    pub source: String,
    pub source_key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub wheelchair_accessible: Option<bool>,
}

impl From<Facility> for FacilityView {
    fn from(facility: Facility) -> Self {
        Self {
            id: facility.id,
            source: facility.source,
            source_key: facility.source_key,
            name: facility.name,
            facility_type: facility.facility_type,
            street: facility.street,
            postal_code: facility.postal_code,
            city: facility.city,
            phone: facility.phone,
            latitude: facility.latitude,
            longitude: facility.longitude,
            wheelchair_accessible: facility.wheelchair_accessible,
        }
    }
}
