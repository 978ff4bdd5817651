use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("permission denied: {0} is not a staff member")]
    PermissionDenied(String),
}
