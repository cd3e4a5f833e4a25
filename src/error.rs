use thiserror::Error;

use crate::model::EmployeeId;

/// Failure at the people-chart transport boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request for employee {id} failed: {message}")]
    Request { id: EmployeeId, message: String },
    #[error("unauthorized (token invalid or expired; set ORG_CHART_TOKEN or `token` in the config)")]
    Unauthorized,
    #[error("forbidden (token has no access to employee {id})")]
    Forbidden { id: EmployeeId },
    #[error("people chart for employee {id} returned HTTP {status}")]
    Status { id: EmployeeId, status: u16 },
    #[error("malformed people chart response for employee {id}: {reason}")]
    Envelope { id: EmployeeId, reason: String },
}

impl TransportError {
    pub fn request(id: EmployeeId, message: impl Into<String>) -> Self {
        Self::Request {
            id,
            message: message.into(),
        }
    }

    pub fn envelope(id: EmployeeId, reason: impl Into<String>) -> Self {
        Self::Envelope {
            id,
            reason: reason.into(),
        }
    }
}

/// Why loading a chart rooted at some employee failed. The `Display` text is
/// what the session stores as its user-facing error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Invalid employee data received from API")]
    InvalidPayload { id: EmployeeId },
}

pub type LoadResult<T> = Result<T, LoadError>;
