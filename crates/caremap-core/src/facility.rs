use serde::{Deserialize, Serialize};

use crate::FacilityId;
use crate::facility_type::FacilityType;

/// A physical care-providing location.
///
/// `(source, source_key)` identifies where the record came from and is unique
/// across all facilities. Coordinates and the accessibility flag are optional:
/// a facility may not be geolocated, and accessibility may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub source: String,
    pub source_key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub wheelchair_accessible: Option<bool>,
}

impl Facility {
    /// Creates a facility with only the required fields set.
    pub fn new(
        id: FacilityId,
        source: impl Into<String>,
        source_key: impl Into<String>,
        name: impl Into<String>,
        facility_type: FacilityType,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            source_key: source_key.into(),
            name: name.into(),
            facility_type,
            street: None,
            postal_code: None,
            city: None,
            phone: None,
            latitude: None,
            longitude: None,
            wheelchair_accessible: None,
        }
    }

    pub fn with_address(
        mut self,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.street = Some(street.into());
        self.postal_code = Some(postal_code.into());
        self.city = Some(city.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_wheelchair_accessible(mut self, accessible: bool) -> Self {
        self.wheelchair_accessible = Some(accessible);
        self
    }

    /// Returns `true` when both coordinates are known.
    pub fn is_geolocated(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
