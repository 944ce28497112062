//! Unified Error Model
//!
//! Three families: validation (recoverable, carries the offending item),
//! authorization (refused, no state change), and transient collaborator
//! failures. Errors are explicit result values; the core never coerces an
//! invalid state into a valid one.

use thiserror::Error;

/// Failure of an external collaborator (identity, persistence, blob store).
/// Transient by policy: persistence failures must not lose in-memory work,
/// blob failures degrade evidence storage instead of aborting the save.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("IDENTITY/{0}")]
    Identity(String),

    #[error("PERSIST/{0}")]
    Persistence(#[from] anyhow::Error),

    #[error("BLOB/{0}")]
    Blob(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// Raised by the validation gate; the report stays in Draft.
    #[error("VALIDATION/{reason}")]
    Validation {
        reason: String,
        /// The offending item, when one can be named, so the caller can
        /// navigate there directly.
        item_id: Option<String>,
    },

    /// An actor attempted an operation their role forbids.
    #[error("AUTH/{0}")]
    Authorization(String),

    #[error("EXTERNAL/{0}")]
    Collaborator(#[from] CollaboratorError),
}

impl EngineError {
    pub fn validation(reason: impl Into<String>) -> Self {
        EngineError::Validation { reason: reason.into(), item_id: None }
    }

    pub fn validation_at(reason: impl Into<String>, item_id: impl Into<String>) -> Self {
        EngineError::Validation { reason: reason.into(), item_id: Some(item_id.into()) }
    }

    pub fn authorization(detail: impl Into<String>) -> Self {
        EngineError::Authorization(detail.into())
    }
}
