use thiserror::Error;
use tonic::Status;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A failed role/permission check. Reported to callers as not-found so
    /// that the existence of records outside their reach is not revealed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage not configured")]
    StorageUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{} not found", entity))
    }

    /// Maps Postgres constraint violations onto domain errors and leaves
    /// everything else as a database error.
    pub fn from_db(err: sqlx::Error, entity: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return AppError::Conflict(format!(
                    "{} references a record that does not exist or is still referenced",
                    entity
                ));
            }
            if db_err.is_unique_violation() {
                return AppError::AlreadyExists(format!("{} already exists", entity));
            }
        }
        AppError::Database(err)
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                Status::internal("Database error")
            }
            AppError::NotFound(msg) => Status::not_found(msg),
            AppError::Validation(errors) => Status::invalid_argument(errors.to_string()),
            AppError::Forbidden(msg) => {
                tracing::warn!("Permission denied: {}", msg);
                Status::not_found("Not found")
            }
            AppError::Conflict(msg) => Status::failed_precondition(msg),
            AppError::AlreadyExists(msg) => Status::already_exists(msg),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                Status::internal(format!("Storage error: {}", msg))
            }
            AppError::StorageUnavailable => {
                Status::unavailable("Screenshot storage not configured")
            }
            AppError::Internal(msg) => Status::internal(msg),
        }
    }
}

impl From<ValidationErrors> for Status {
    fn from(errors: ValidationErrors) -> Self {
        Status::invalid_argument(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;
    use tonic::Code;

    #[test]
    fn test_forbidden_is_reported_as_not_found() {
        let status: Status = AppError::Forbidden("org:tickets:manage".to_string()).into();
        assert_eq!(status.code(), Code::NotFound);
        assert!(!status.message().contains("org:tickets:manage"));
    }

    #[test]
    fn test_validation_maps_to_invalid_argument_with_field_messages() {
        let errors = ValidationErrors::from(vec![FieldError::new(
            "name",
            "Name must be at least 1 character long",
        )]);
        let status: Status = AppError::Validation(errors).into();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "name: Name must be at least 1 character long"
        );
    }

    #[test]
    fn test_storage_unavailable() {
        let status: Status = AppError::StorageUnavailable.into();
        assert_eq!(status.code(), Code::Unavailable);
    }
}
