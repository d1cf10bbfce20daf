//! Domain Errors
//!
//! Two layers of errors:
//!
//! - [`DomainError`]: raw failures reported by ports (store, bus).
//! - [`RpcError`]: the normalized `{status, message}` shape every caller sees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error category of a normalized error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 400: malformed id, failed shape validation, duplicate review
    BadInput,
    /// 404: missing review or product
    NotFound,
    /// 500: persistence failure, remote-call failure, anything unclassified
    Unexpected,
}

impl ErrorKind {
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::BadInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Unexpected => 500,
        }
    }
}

/// Normalized error returned to message-pattern callers.
///
/// `status` follows HTTP semantics even though no HTTP transport is involved.
/// A status received from a remote service is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{status}: {message}")]
pub struct RpcError {
    pub status: u16,
    pub message: String,
}

impl RpcError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: kind.status(),
            message: message.into(),
        }
    }

    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadInput, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Parse a JSON value that is already in `{status, message}` shape.
    ///
    /// Returns `None` for anything else (plain strings, objects missing either
    /// field, non-numeric status).
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let status = value.get("status")?.as_u64()?;
        let message = value.get("message")?.as_str()?;
        Some(Self {
            status: u16::try_from(status).ok()?,
            message: message.to_string(),
        })
    }
}

/// Failures reported by ports
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    /// An error that some other layer has already normalized
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    /// Pass an already-normalized error through untouched, otherwise wrap it
    /// as `Unexpected` with the given message.
    pub fn normalize(self, message: impl Into<String>) -> RpcError {
        match self {
            DomainError::Rpc(e) => e,
            _ => RpcError::unexpected(message),
        }
    }
}
