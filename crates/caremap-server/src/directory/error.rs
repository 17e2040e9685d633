use caremap_api::ApiError;
use caremap_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DirectoryError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DirectoryError::Storage(e) if e.is_connection_error() => {
                ApiError::service_unavailable("storage_unavailable", e.to_string())
            }
            DirectoryError::Storage(e) => {
                tracing::error!(category = %e.category(), error = %e, "Directory store failure");
                ApiError::internal("directory store failure")
            }
        }
    }
}
