use thiserror::Error;

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
    #[error("could not get data")]
    FetchError,
    #[error("could not store data")]
    InsertError,
    #[error("could not delete data")]
    DeleteError,
}
