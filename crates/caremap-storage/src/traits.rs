//! Storage traits for the directory store abstraction.

use async_trait::async_trait;
use caremap_core::{DoctorId, Facility, FacilityId};

use crate::error::StorageError;
use crate::types::DoctorRecord;

/// Read-only access to the facility and doctor directory.
///
/// Implementations must be thread-safe (`Send + Sync`). Uniqueness of
/// `(source, source_key)` and cascading removal of doctors with their
/// facility are the backend's responsibility.
///
/// # Example
///
/// ```ignore
/// use caremap_storage::{DirectoryStore, StorageError};
///
/// async fn doctor_count(store: &dyn DirectoryStore) -> Result<usize, StorageError> {
///     Ok(store.list_doctor_records().await?.len())
/// }
/// ```
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Returns every doctor joined with its facility.
    ///
    /// No ordering is guaranteed; callers that need one sort themselves.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn list_doctor_records(&self) -> Result<Vec<DoctorRecord>, StorageError>;

    /// Reads a doctor by id, joined with its facility.
    ///
    /// Returns `None` if no doctor has this id.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing records.
    async fn find_doctor_record(&self, id: DoctorId)
    -> Result<Option<DoctorRecord>, StorageError>;

    /// Returns every facility in the store's iteration order.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn list_facilities(&self) -> Result<Vec<Facility>, StorageError>;

    /// Reads a facility by id.
    ///
    /// Returns `None` if no facility has this id.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing records.
    async fn find_facility(&self, id: FacilityId) -> Result<Option<Facility>, StorageError>;

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConnectionError` if the backend cannot be reached.
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
