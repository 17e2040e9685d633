use thiserror::Error;

/// Core error types for CareMap directory data
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid facility type: {0}")]
    InvalidFacilityType(String),
}

impl CoreError {
    /// Create a new InvalidFacilityType error
    pub fn invalid_facility_type(value: impl Into<String>) -> Self {
        Self::InvalidFacilityType(value.into())
    }
}
