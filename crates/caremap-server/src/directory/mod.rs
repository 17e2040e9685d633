//! Directory projection: stored facility and doctor records as flat,
//! client-ready views.

mod error;
mod filter;
mod projector;
mod views;

pub use error::DirectoryError;
pub use filter::FacilityFilter;
pub use projector::DirectoryProjector;
pub use views::{DoctorListItem, FacilityView};
