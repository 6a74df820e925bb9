use thiserror::Error;

/// Failure taxonomy of the record store.
///
/// Every fallible operation returns one of these as a plain value; the
/// embedding transport (if any) is responsible for mapping variants onto its
/// own status codes. Messages are human-readable and safe to surface.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for StoreError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Self::Storage(format!("failed to encode snapshot: {}", err))
    }
}

impl From<rmp_serde::decode::Error> for StoreError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Self::Storage(format!("failed to decode snapshot: {}", err))
    }
}
