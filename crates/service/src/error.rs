use kanban_core::error::CoreError;

/// Failure of a service operation.
///
/// `Core` carries the caller-facing outcomes (not found, validation);
/// `Storage` is any persistence failure and is reported to clients as an
/// opaque internal error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
