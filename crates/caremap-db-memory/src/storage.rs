use async_trait::async_trait;
use caremap_core::{Doctor, DoctorId, Facility, FacilityId};
use caremap_storage::{DirectoryStore, DoctorRecord, StorageError};
use papaya::HashMap as PapayaHashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// `(source, source_key)` provenance key.
type SourceKey = (String, String);

/// In-memory directory store using papaya lock-free HashMaps.
///
/// Reads never block. Writes are serialized through a single lock so the
/// uniqueness indexes and the facility/doctor relationship stay consistent:
/// - `(source, source_key)` is unique per entity kind
/// - every doctor references an existing facility
/// - removing a facility removes its doctors
///
/// Listings are returned in ascending id order.
#[derive(Debug)]
pub struct InMemoryStore {
    facilities: Arc<PapayaHashMap<FacilityId, Facility>>,
    doctors: Arc<PapayaHashMap<DoctorId, Doctor>>,
    facility_keys: Arc<PapayaHashMap<SourceKey, FacilityId>>,
    doctor_keys: Arc<PapayaHashMap<SourceKey, DoctorId>>,
    write_lock: Mutex<()>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            facilities: Arc::new(PapayaHashMap::new()),
            doctors: Arc::new(PapayaHashMap::new()),
            facility_keys: Arc::new(PapayaHashMap::new()),
            doctor_keys: Arc::new(PapayaHashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Adds a facility.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the id is taken and
    /// `StorageError::DuplicateSourceKey` if `(source, source_key)` is taken.
    pub async fn insert_facility(&self, facility: Facility) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        if self.facilities.pin().contains_key(&facility.id) {
            return Err(StorageError::invalid_record(format!(
                "facility id {} already exists",
                facility.id
            )));
        }

        let key = (facility.source.clone(), facility.source_key.clone());
        let keys = self.facility_keys.pin();
        if keys.contains_key(&key) {
            return Err(StorageError::duplicate_source_key(
                "Facility",
                &facility.source,
                &facility.source_key,
            ));
        }

        keys.insert(key, facility.id);
        self.facilities.pin().insert(facility.id, facility);
        Ok(())
    }

    /// Adds a doctor to an existing facility.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the id is taken or the owning
    /// facility does not exist, and `StorageError::DuplicateSourceKey` if
    /// `(source, source_key)` is taken.
    pub async fn insert_doctor(&self, doctor: Doctor) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        if self.doctors.pin().contains_key(&doctor.id) {
            return Err(StorageError::invalid_record(format!(
                "doctor id {} already exists",
                doctor.id
            )));
        }
        if !self.facilities.pin().contains_key(&doctor.facility_id) {
            return Err(StorageError::invalid_record(format!(
                "doctor {} references unknown facility {}",
                doctor.id, doctor.facility_id
            )));
        }

        let key = (doctor.source.clone(), doctor.source_key.clone());
        let keys = self.doctor_keys.pin();
        if keys.contains_key(&key) {
            return Err(StorageError::duplicate_source_key(
                "Doctor",
                &doctor.source,
                &doctor.source_key,
            ));
        }

        keys.insert(key, doctor.id);
        self.doctors.pin().insert(doctor.id, doctor);
        Ok(())
    }

    /// Removes a facility together with every doctor it owns.
    ///
    /// Returns the removed facility, or `None` if the id was unknown.
    pub async fn remove_facility(&self, id: FacilityId) -> Option<Facility> {
        let _guard = self.write_lock.lock().await;

        let facility = self.facilities.pin().get(&id).cloned()?;

        // Doctors go first so readers never see one without its facility.
        let doctors = self.doctors.pin();
        let owned: Vec<Doctor> = doctors
            .iter()
            .filter(|(_, d)| d.facility_id == id)
            .map(|(_, d)| d.clone())
            .collect();

        let doctor_keys = self.doctor_keys.pin();
        for doctor in &owned {
            doctors.remove(&doctor.id);
            doctor_keys.remove(&(doctor.source.clone(), doctor.source_key.clone()));
        }

        self.facilities.pin().remove(&id);
        self.facility_keys
            .pin()
            .remove(&(facility.source.clone(), facility.source_key.clone()));

        tracing::debug!(
            facility_id = id,
            doctors_removed = owned.len(),
            "Removed facility"
        );

        Some(facility)
    }

    /// Number of stored facilities.
    pub fn facility_count(&self) -> usize {
        self.facilities.pin().len()
    }

    /// Number of stored doctors.
    pub fn doctor_count(&self) -> usize {
        self.doctors.pin().len()
    }

    /// Pairs a doctor with its facility.
    ///
    /// Inserts guarantee the facility exists, so `None` means a concurrent
    /// `remove_facility` took both after the doctor was read.
    fn join(&self, doctor: Doctor) -> Option<DoctorRecord> {
        let facility = self.facilities.pin().get(&doctor.facility_id).cloned()?;
        Some(DoctorRecord { doctor, facility })
    }
}

#[async_trait]
impl DirectoryStore for InMemoryStore {
    async fn list_doctor_records(&self) -> Result<Vec<DoctorRecord>, StorageError> {
        let mut doctors: Vec<Doctor> = self
            .doctors
            .pin()
            .iter()
            .map(|(_, d)| d.clone())
            .collect();
        doctors.sort_by_key(|d| d.id);

        Ok(doctors.into_iter().filter_map(|d| self.join(d)).collect())
    }

    async fn find_doctor_record(
        &self,
        id: DoctorId,
    ) -> Result<Option<DoctorRecord>, StorageError> {
        let doctor = self.doctors.pin().get(&id).cloned();
        Ok(doctor.and_then(|d| self.join(d)))
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>, StorageError> {
        let mut facilities: Vec<Facility> = self
            .facilities
            .pin()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        facilities.sort_by_key(|f| f.id);
        Ok(facilities)
    }

    async fn find_facility(&self, id: FacilityId) -> Result<Option<Facility>, StorageError> {
        Ok(self.facilities.pin().get(&id).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
