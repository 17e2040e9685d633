//! JSON seed loading for the in-memory store.

use std::path::Path;

use caremap_core::{Doctor, Facility};
use caremap_storage::StorageError;
use serde::Deserialize;

use crate::storage::InMemoryStore;

/// Contents of a seed file: `{"facilities": [...], "doctors": [...]}`.
///
/// Records use the snake_case field names of the core types, with the
/// facility type given as its code (`"ARZTPRAXIS"`) or English name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

impl SeedData {
    /// Parses seed data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the JSON is malformed or a
    /// record fails to deserialize.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json)
            .map_err(|e| StorageError::invalid_record(format!("invalid seed data: {e}")))
    }
}

impl InMemoryStore {
    /// Builds a store from seed data.
    ///
    /// Facilities are inserted before doctors, so doctors may appear in any
    /// order. The first violated invariant aborts loading.
    ///
    /// # Errors
    ///
    /// Returns the insertion error of the first offending record.
    pub async fn from_seed(seed: SeedData) -> Result<Self, StorageError> {
        let store = Self::new();
        for facility in seed.facilities {
            store.insert_facility(facility).await?;
        }
        for doctor in seed.doctors {
            store.insert_doctor(doctor).await?;
        }

        tracing::info!(
            facilities = store.facility_count(),
            doctors = store.doctor_count(),
            "Loaded directory seed"
        );

        Ok(store)
    }

    /// Builds a store from a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Internal` if the file cannot be read, otherwise
    /// the errors of [`SeedData::from_json`] and [`InMemoryStore::from_seed`].
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::internal(format!("failed to read seed file {}: {e}", path.display()))
        })?;
        Self::from_seed(SeedData::from_json(&json)?).await
    }
}
