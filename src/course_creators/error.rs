use thiserror::Error;

use crate::{auth::errors::AuthorizationError, database::error::RepositoryError};

#[derive(Error, Debug)]
pub enum CourseCreatorError {
    #[error(transparent)]
    PermissionDenied(#[from] AuthorizationError),
    #[error("no course creator status recorded for {0}")]
    StatusUnset(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
