use caremap_core::{DoctorId, FacilityId};
use caremap_storage::DynDirectoryStore;

use super::{DirectoryError, DoctorListItem, FacilityFilter, FacilityView};

/// Read-only projection over a directory store.
///
/// Holds no state besides the store handle, so clones are cheap and every
/// method can run concurrently.
#[derive(Clone)]
pub struct DirectoryProjector {
    store: DynDirectoryStore,
}

impl DirectoryProjector {
    pub fn new(store: DynDirectoryStore) -> Self {
        Self { store }
    }

    /// All doctors with their facility, ordered by last name, first name and
    /// display name (missing name parts sort first, case and umlauts folded),
    /// then by id.
    pub async fn list_doctors(&self) -> Result<Vec<DoctorListItem>, DirectoryError> {
        let mut records = self.store.list_doctor_records().await?;
        records.sort_by(|a, b| a.doctor.listing_order(&b.doctor));
        Ok(records.into_iter().map(DoctorListItem::from).collect())
    }

    pub async fn get_doctor(&self, id: DoctorId) -> Result<DoctorListItem, DirectoryError> {
        self.store
            .find_doctor_record(id)
            .await?
            .map(DoctorListItem::from)
            .ok_or_else(|| DirectoryError::not_found("Doctor", id))
    }

    /// All facilities in store order.
    pub async fn list_facilities(&self) -> Result<Vec<FacilityView>, DirectoryError> {
        let facilities = self.store.list_facilities().await?;
        Ok(facilities.into_iter().map(FacilityView::from).collect())
    }

    /// Facilities matching `filter`, in store order.
    pub async fn list_facilities_filtered(
        &self,
        filter: &FacilityFilter,
    ) -> Result<Vec<FacilityView>, DirectoryError> {
        if filter.is_empty() {
            return self.list_facilities().await;
        }
        let facilities = self.store.list_facilities().await?;
        Ok(facilities
            .into_iter()
            .filter(|f| filter.matches(f))
            .map(FacilityView::from)
            .collect())
    }

    pub async fn get_facility(&self, id: FacilityId) -> Result<FacilityView, DirectoryError> {
        self.store
            .find_facility(id)
            .await?
            .map(FacilityView::from)
            .ok_or_else(|| DirectoryError::not_found("Facility", id))
    }

    pub fn store(&self) -> &DynDirectoryStore {
        &self.store
    }
}

impl std::fmt::Debug for DirectoryProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryProjector")
            .field("backend", &self.store.backend_name())
            .finish()
    }
}
