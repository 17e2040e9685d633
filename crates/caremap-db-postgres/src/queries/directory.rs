//! Directory read queries.
//!
//! Facility columns are selected under a `facility_` prefix in every query so
//! the same row mapper serves both the facility lookups and the doctor join.

use caremap_core::{Doctor, DoctorId, Facility, FacilityId, FacilityType};
use caremap_storage::{DoctorRecord, StorageError};
use sqlx_core::query::query;
use sqlx_core::row::Row;
use sqlx_postgres::{PgPool, PgRow};
use tracing::warn;

use crate::error::query_error;

const FACILITY_COLUMNS: &str = "\
    f.id AS facility_id, \
    f.source AS facility_source, \
    f.source_key AS facility_source_key, \
    f.facility_name, \
    f.type AS facility_type, \
    f.street AS facility_street, \
    f.postal_code AS facility_postal_code, \
    f.city AS facility_city, \
    f.phone AS facility_phone, \
    f.latitude AS facility_latitude, \
    f.longitude AS facility_longitude, \
    f.wheelchair_accessible AS facility_wheelchair_accessible";

const DOCTOR_COLUMNS: &str = "\
    d.id AS doctor_id, \
    d.source AS doctor_source, \
    d.source_key AS doctor_source_key, \
    d.name AS doctor_name, \
    d.first_name AS doctor_first_name, \
    d.last_name AS doctor_last_name, \
    d.specialty AS doctor_specialty";

const DOCTOR_ORDER: &str = "COALESCE(d.last_name, ''), COALESCE(d.first_name, ''), d.name, d.id";

/// Lists every doctor joined with its facility, in listing order.
pub async fn list_doctor_records(pool: &PgPool) -> Result<Vec<DoctorRecord>, StorageError> {
    let sql = format!(
        "SELECT {DOCTOR_COLUMNS}, {FACILITY_COLUMNS} \
         FROM doctors d JOIN facilities f ON f.id = d.facility_id \
         ORDER BY {DOCTOR_ORDER}"
    );

    let rows = query(&sql).fetch_all(pool).await.map_err(query_error)?;
    rows.iter().map(doctor_record_from_row).collect()
}

/// Reads one doctor joined with its facility.
pub async fn find_doctor_record(
    pool: &PgPool,
    id: DoctorId,
) -> Result<Option<DoctorRecord>, StorageError> {
    let sql = format!(
        "SELECT {DOCTOR_COLUMNS}, {FACILITY_COLUMNS} \
         FROM doctors d JOIN facilities f ON f.id = d.facility_id \
         WHERE d.id = $1"
    );

    let row = query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(query_error)?;

    row.as_ref().map(doctor_record_from_row).transpose()
}

/// Lists every facility in id order.
pub async fn list_facilities(pool: &PgPool) -> Result<Vec<Facility>, StorageError> {
    let sql = format!("SELECT {FACILITY_COLUMNS} FROM facilities f ORDER BY f.id");

    let rows = query(&sql).fetch_all(pool).await.map_err(query_error)?;
    rows.iter().map(facility_from_row).collect()
}

/// Reads one facility.
pub async fn find_facility(pool: &PgPool, id: FacilityId) -> Result<Option<Facility>, StorageError> {
    let sql = format!("SELECT {FACILITY_COLUMNS} FROM facilities f WHERE f.id = $1");

    let row = query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(query_error)?;

    row.as_ref().map(facility_from_row).transpose()
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, StorageError>
where
    T: sqlx_core::decode::Decode<'r, sqlx_postgres::Postgres>
        + sqlx_core::types::Type<sqlx_postgres::Postgres>,
{
    row.try_get(name)
        .map_err(|e| StorageError::internal(format!("Failed to decode column {name}: {e}")))
}

fn facility_from_row(row: &PgRow) -> Result<Facility, StorageError> {
    let id: FacilityId = column(row, "facility_id")?;
    let raw_type: String = column(row, "facility_type")?;

    Ok(Facility {
        id,
        source: column(row, "facility_source")?,
        source_key: column(row, "facility_source_key")?,
        name: column(row, "facility_name")?,
        facility_type: stored_facility_type(id, &raw_type),
        street: column(row, "facility_street")?,
        postal_code: column(row, "facility_postal_code")?,
        city: column(row, "facility_city")?,
        phone: column(row, "facility_phone")?,
        latitude: column(row, "facility_latitude")?,
        longitude: column(row, "facility_longitude")?,
        wheelchair_accessible: column(row, "facility_wheelchair_accessible")?,
    })
}

fn doctor_record_from_row(row: &PgRow) -> Result<DoctorRecord, StorageError> {
    let facility = facility_from_row(row)?;
    let doctor = Doctor {
        id: column(row, "doctor_id")?,
        facility_id: facility.id,
        source: column(row, "doctor_source")?,
        source_key: column(row, "doctor_source_key")?,
        name: column(row, "doctor_name")?,
        first_name: column(row, "doctor_first_name")?,
        last_name: column(row, "doctor_last_name")?,
        specialty: column(row, "doctor_specialty")?,
    };

    Ok(DoctorRecord { doctor, facility })
}

/// Older imports wrote free-text types; anything that is not a known code
/// reads as `SONSTIGES`.
fn stored_facility_type(facility_id: FacilityId, raw: &str) -> FacilityType {
    raw.parse().unwrap_or_else(|_| {
        warn!(
            facility_id,
            stored_type = raw,
            "Unknown facility type in store, treating as SONSTIGES"
        );
        FacilityType::Other
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_facility_type_is_lenient() {
        assert_eq!(stored_facility_type(1, "APOTHEKE"), FacilityType::Pharmacy);
        assert_eq!(stored_facility_type(1, "krankenhaus"), FacilityType::Hospital);
        assert_eq!(
            stored_facility_type(1, "Hausarztpraxis Dr. Müller"),
            FacilityType::Other
        );
    }
}
