use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use caremap_api::ApiError;
use caremap_core::{Doctor, DoctorId, Facility, FacilityId, FacilityType};
use caremap_db_memory::{InMemoryStore, SeedData};
use caremap_server::{DirectoryError, DirectoryProjector, FacilityFilter};
use caremap_storage::{DirectoryStore, DoctorRecord, StorageError};

/// Store whose every call fails with the given error kind.
struct FailingStore {
    connection: bool,
}

impl FailingStore {
    fn error(&self) -> StorageError {
        if self.connection {
            StorageError::connection_error("pool timed out")
        } else {
            StorageError::internal("relation \"doctors\" does not exist")
        }
    }
}

#[async_trait]
impl DirectoryStore for FailingStore {
    async fn list_doctor_records(&self) -> Result<Vec<DoctorRecord>, StorageError> {
        Err(self.error())
    }

    async fn find_doctor_record(
        &self,
        _id: DoctorId,
    ) -> Result<Option<DoctorRecord>, StorageError> {
        Err(self.error())
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>, StorageError> {
        Err(self.error())
    }

    async fn find_facility(&self, _id: FacilityId) -> Result<Option<Facility>, StorageError> {
        Err(self.error())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

const SEED: &str = r#"{
  "facilities": [
    {"id": 7, "source": "kvwl", "source_key": "P-7", "name": "Praxis Dr. Schulz", "type": "ARZTPRAXIS",
     "street": "Hauptstraße 5", "postal_code": "44135", "city": "Dortmund",
     "latitude": 51.5136, "longitude": 7.4653, "wheelchair_accessible": true},
    {"id": 3, "source": "kvwl", "source_key": "K-3", "name": "St. Marien Hospital", "type": "KRANKENHAUS"},
    {"id": 5, "source": "aok", "source_key": "P-7", "name": "Pflegedienst Sonnenschein", "type": "AMBULANTER_PFLEGEDIENST"}
  ],
  "doctors": [
    {"id": 100, "facility_id": 7, "source": "kvwl", "source_key": "A-1", "name": "Dr. Eva Schulz",
     "first_name": "Eva", "last_name": "Schulz", "specialty": "Innere Medizin"},
    {"id": 101, "facility_id": 3, "source": "kvwl", "source_key": "A-2", "name": "Notaufnahme"},
    {"id": 102, "facility_id": 3, "source": "kvwl", "source_key": "A-3", "name": "Dr. Karl Ahrens",
     "first_name": "Karl", "last_name": "Ahrens"}
  ]
}"#;

async fn seeded() -> DirectoryProjector {
    let seed = SeedData::from_json(SEED).expect("seed");
    let store = InMemoryStore::from_seed(seed).await.expect("store");
    DirectoryProjector::new(Arc::new(store))
}

#[tokio::test]
async fn list_items_carry_their_facility() {
    let projector = seeded().await;
    let doctors = projector.list_doctors().await.unwrap();

    assert_eq!(
        doctors.iter().map(|d| d.doctor_id).collect::<Vec<_>>(),
        vec![101, 102, 100]
    );

    let schulz = &doctors[2];
    assert_eq!(schulz.name, "Dr. Eva Schulz");
    assert_eq!(schulz.specialty.as_deref(), Some("Innere Medizin"));
    assert_eq!(schulz.facility_id, 7);
    assert_eq!(schulz.facility_name, "Praxis Dr. Schulz");
    assert_eq!(schulz.facility_type, FacilityType::MedicalPractice);
    assert_eq!(schulz.street.as_deref(), Some("Hauptstraße 5"));
    assert_eq!(schulz.postal_code.as_deref(), Some("44135"));
    assert_eq!(schulz.city.as_deref(), Some("Dortmund"));
    assert_eq!(schulz.latitude, Some(51.5136));
    assert_eq!(schulz.longitude, Some(7.4653));
    assert_eq!(schulz.wheelchair_accessible, Some(true));

    let emergency = &doctors[0];
    assert_eq!(emergency.facility_type, FacilityType::Hospital);
    assert_eq!(emergency.specialty, None);
    assert_eq!(emergency.city, None);
}

#[tokio::test]
async fn single_doctor_matches_list_entry() {
    let projector = seeded().await;
    let listed = projector.list_doctors().await.unwrap();
    for item in &listed {
        assert_eq!(&projector.get_doctor(item.doctor_id).await.unwrap(), item);
    }
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let projector = seeded().await;
    assert_eq!(
        projector.list_doctors().await.unwrap(),
        projector.list_doctors().await.unwrap()
    );
    assert_eq!(
        projector.list_facilities().await.unwrap(),
        projector.list_facilities().await.unwrap()
    );
}

#[tokio::test]
async fn facilities_keep_every_field() {
    let projector = seeded().await;
    let facilities = projector.list_facilities().await.unwrap();
    assert_eq!(
        facilities.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![3, 5, 7]
    );

    let practice = projector.get_facility(7).await.unwrap();
    assert_eq!(practice.source, "kvwl");
    assert_eq!(practice.source_key, "P-7");
    assert_eq!(practice.facility_type, FacilityType::MedicalPractice);
    assert_eq!(practice.wheelchair_accessible, Some(true));

    let care = projector.get_facility(5).await.unwrap();
    assert_eq!(care.source_key, "P-7");
    assert_eq!(care.facility_type, FacilityType::OutpatientCareService);
}

#[tokio::test]
async fn filtered_listing() {
    let projector = seeded().await;

    let hospitals = projector
        .list_facilities_filtered(&FacilityFilter {
            facility_type: Some(FacilityType::Hospital),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hospitals.len(), 1);
    assert_eq!(hospitals[0].id, 3);

    let by_text = projector
        .list_facilities_filtered(&FacilityFilter {
            q: Some("pflege".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_text.iter().map(|f| f.id).collect::<Vec<_>>(), vec![5]);
}

#[tokio::test]
async fn doctor_of_removed_facility_disappears() {
    let store = Arc::new(InMemoryStore::new());
    store
        .insert_facility(Facility::new(1, "kvwl", "F", "Praxis", FacilityType::MedicalPractice))
        .await
        .unwrap();
    store
        .insert_doctor(Doctor::new(1, 1, "kvwl", "D", "Dr. Max Roth"))
        .await
        .unwrap();

    let projector = DirectoryProjector::new(store.clone());
    assert!(projector.get_doctor(1).await.is_ok());

    store.remove_facility(1).await;
    assert!(matches!(
        projector.get_doctor(1).await,
        Err(DirectoryError::NotFound { .. })
    ));
    assert!(projector.list_doctors().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_failures_map_to_server_errors() {
    let unreachable = DirectoryProjector::new(Arc::new(FailingStore { connection: true }));
    let err: ApiError = unreachable.list_doctors().await.unwrap_err().into();
    assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(err.code(), "storage_unavailable");

    let broken = DirectoryProjector::new(Arc::new(FailingStore { connection: false }));
    let err: ApiError = broken.get_facility(1).await.unwrap_err().into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.code(), "internal_error");
    assert!(!err.to_error_body().error.message.contains("relation"));
}
