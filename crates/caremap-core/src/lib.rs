//! Core directory types for CareMap.
//!
//! The directory holds two kinds of records: [`Facility`] (a place that
//! provides care) and [`Doctor`] (a practitioner owned by exactly one
//! facility). Both are read-only from the service's point of view; they are
//! produced by an ingestion process and exposed through the storage crates.

pub mod doctor;
pub mod error;
pub mod facility;
pub mod facility_type;

pub use doctor::Doctor;
pub use error::CoreError;
pub use facility::Facility;
pub use facility_type::FacilityType;

/// Store-assigned identifier of a facility.
pub type FacilityId = i64;

/// Store-assigned identifier of a doctor.
pub type DoctorId = i64;
