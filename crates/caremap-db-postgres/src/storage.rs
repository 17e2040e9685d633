//! PostgreSQL implementation of `DirectoryStore`.

use async_trait::async_trait;
use caremap_core::{DoctorId, Facility, FacilityId};
use caremap_storage::{DirectoryStore, DoctorRecord, StorageError};
use sqlx_core::query::query;
use sqlx_postgres::PgPool;
use tracing::{debug, info};

use crate::config::PostgresConfig;
use crate::error::{PostgresError, query_error};
use crate::{migrations, queries};

/// Directory store backed by the `facilities` and `doctors` tables.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects to the database and, if configured, applies migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or a migration fails.
    pub async fn new(config: PostgresConfig) -> Result<Self, PostgresError> {
        let pool = config.pool_options()?.connect(&config.url).await?;

        if config.run_migrations {
            migrations::run(&pool).await?;
        }

        info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
            "PostgreSQL directory store initialized"
        );
        Ok(Self { pool })
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DirectoryStore for PostgresStore {
    async fn list_doctor_records(&self) -> Result<Vec<DoctorRecord>, StorageError> {
        queries::directory::list_doctor_records(&self.pool).await
    }

    async fn find_doctor_record(
        &self,
        id: DoctorId,
    ) -> Result<Option<DoctorRecord>, StorageError> {
        queries::directory::find_doctor_record(&self.pool, id).await
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>, StorageError> {
        queries::directory::list_facilities(&self.pool).await
    }

    async fn find_facility(&self, id: FacilityId) -> Result<Option<Facility>, StorageError> {
        queries::directory::find_facility(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        debug!("PostgreSQL directory store reachable");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
