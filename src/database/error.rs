use thiserror::Error;
use warp::{http::StatusCode, reject::Reject};

use crate::constants::{INTERNAL_ERROR, NAME_TAKEN};

/// Failure of a catalog or registry operation.
///
/// Every variant except `Internal` leaves stored state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A required field is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Duplicate name, or a delete refused by the usage guard
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Unexpected storage failure; the detail is for the server log only
    #[error("storage failure: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn validation(info: &str) -> Self {
        Self::Validation(info.to_string())
    }

    pub fn conflict(info: &str) -> Self {
        Self::Conflict(info.to_string())
    }

    pub fn not_found(info: &str) -> Self {
        Self::NotFound(info.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) | CatalogError::Conflict(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::Internal(_) => INTERNAL_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Database(e) if e.is_unique_violation() => Self::conflict(NAME_TAKEN),
            sqlx::Error::Database(e) => Self::Internal(format!("{e}")),
            sqlx::Error::Io(e) => Self::Internal(format!("{e}")),
            sqlx::Error::Tls(e) => Self::Internal(format!("{e}")),
            sqlx::Error::Protocol(e) => Self::Internal(e),
            sqlx::Error::ColumnNotFound(e) => Self::Internal(format!("Column not found: {e}")),
            sqlx::Error::ColumnDecode { index, source } => {
                Self::Internal(format!("Column decode {index} ({source})"))
            }
            sqlx::Error::Decode(e) => Self::Internal(format!("{e}")),
            sqlx::Error::PoolTimedOut => Self::Internal("Pool timed out".to_string()),
            sqlx::Error::PoolClosed => Self::Internal("Pool closed".to_string()),
            other => Self::Internal(format!("{other}")),
        }
    }
}

impl Reject for CatalogError {}
