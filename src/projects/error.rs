use thiserror::Error;

use crate::database::StoreError;
use crate::projects::form::FormErrors;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid project form: {0}")]
    Validation(FormErrors),

    /// Not the author and not allowed to fork, or a publish target that is
    /// missing or owned by someone else.
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Project not found")]
    NotFound,

    #[error("Project was modified concurrently (expected version {expected})")]
    Conflict { expected: i64 },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ProjectError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ProjectError::NotFound,
            StoreError::Conflict { expected } => ProjectError::Conflict { expected },
            other => ProjectError::Store(other),
        }
    }
}

impl From<FormErrors> for ProjectError {
    fn from(errors: FormErrors) -> Self {
        ProjectError::Validation(errors)
    }
}
