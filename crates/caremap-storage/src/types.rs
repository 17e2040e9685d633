//! Storage types shared by directory backends.

use caremap_core::{Doctor, Facility};

/// A doctor joined with the facility that owns it.
///
/// This is the flat tuple the store hands to the projection layer; backends
/// guarantee `doctor.facility_id == facility.id`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorRecord {
    pub doctor: Doctor,
    pub facility: Facility,
}

impl DoctorRecord {
    /// Joins a doctor with its facility.
    ///
    /// Returns `None` if the facility is not the doctor's owner.
    #[must_use]
    pub fn join(doctor: Doctor, facility: Facility) -> Option<Self> {
        (doctor.facility_id == facility.id).then_some(Self { doctor, facility })
    }
}
