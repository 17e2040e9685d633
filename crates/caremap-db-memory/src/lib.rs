//! In-memory directory store for CareMap.
//!
//! This crate provides an in-memory implementation of the `DirectoryStore`
//! trait from `caremap-storage`, using papaya lock-free HashMaps for
//! concurrent reads. It backs local development and the test suites.
//!
//! # Example
//!
//! ```ignore
//! use caremap_core::{Doctor, Facility, FacilityType};
//! use caremap_db_memory::InMemoryStore;
//! use caremap_storage::DirectoryStore;
//!
//! let store = InMemoryStore::new();
//! store
//!     .insert_facility(Facility::new(1, "kvwl", "f1", "Praxis am Markt", FacilityType::MedicalPractice))
//!     .await?;
//! store
//!     .insert_doctor(Doctor::new(1, 1, "kvwl", "d1", "Dr. Anna Becker"))
//!     .await?;
//!
//! let records = store.list_doctor_records().await?;
//! ```

mod seed;
mod storage;

pub use caremap_storage::{DirectoryStore, StorageError};

pub use seed::SeedData;
pub use storage::InMemoryStore;

