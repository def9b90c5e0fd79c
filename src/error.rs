//! Error taxonomy shared by the orchestrator, the ledgers and the
//! collaborator contracts.

use tonic::Status;
use tracing::error;

/// Result type for staffing operations.
pub type Result<T> = std::result::Result<T, StaffingError>;

/// Coarse classification of a failure, used when surfacing it outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    BadRequest,
    Internal,
}

/// Errors that can occur while validating or mutating staffing records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Remote call unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StaffingError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StaffingError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StaffingError::NotFound { .. } => ErrorKind::NotFound,
            StaffingError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StaffingError::BadRequest(_) => ErrorKind::BadRequest,
            StaffingError::Cancelled
            | StaffingError::Unavailable(_)
            | StaffingError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StaffingError> for Status {
    fn from(err: StaffingError) -> Self {
        match err {
            StaffingError::NotFound { .. } => Status::not_found(err.to_string()),
            StaffingError::AlreadyExists(msg) => Status::already_exists(msg),
            StaffingError::BadRequest(msg) => Status::invalid_argument(msg),
            StaffingError::Cancelled => Status::cancelled("Request cancelled"),
            StaffingError::Unavailable(detail) => {
                error!(detail = %detail, "Downstream service unavailable");
                Status::unavailable("Downstream service unavailable")
            }
            StaffingError::Internal(detail) => {
                error!(detail = %detail, "Unclassified failure");
                Status::internal("Internal error")
            }
        }
    }
}
