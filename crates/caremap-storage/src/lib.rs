//! # caremap-storage
//!
//! Storage abstraction for the CareMap directory.
//!
//! This crate defines the contract every directory backend implements. It
//! does not contain any implementations; see `caremap-db-memory` and
//! `caremap-db-postgres`.
//!
//! ## Overview
//!
//! The main trait is [`DirectoryStore`], a read-only view of facilities and
//! doctors:
//! - all doctors joined with their facility ([`DoctorRecord`])
//! - a single doctor by id, joined with its facility
//! - all facilities
//! - a single facility by id
//!
//! Missing ids are reported as `Ok(None)`; errors are reserved for
//! infrastructure problems.
//!
//! ## Example
//!
//! ```ignore
//! use caremap_storage::{DirectoryStore, StorageError};
//!
//! async fn facility_name(
//!     store: &dyn DirectoryStore,
//!     id: i64,
//! ) -> Result<Option<String>, StorageError> {
//!     Ok(store.find_facility(id).await?.map(|f| f.name))
//! }
//! ```

mod error;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::DirectoryStore;
pub use types::DoctorRecord;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shareable directory store.
pub type DynDirectoryStore = std::sync::Arc<dyn DirectoryStore>;
