use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with an owned id.
    pub fn not_found(entity: &'static str, id: impl Into<DbId>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
