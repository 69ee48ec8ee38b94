use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy carried by `DispatchEvent::Error`
///
/// Fixed enumeration; platform adapters map their native failure codes onto
/// these four kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PushErrorKind {
    /// Unclassified platform failure
    Unknown,
    /// User or OS denied notification permission
    PermissionDenied,
    /// Platform registration call failed
    RegistrationFailed,
    /// Platform unregistration call failed
    UnregistrationFailed,
}

impl PushErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushErrorKind::Unknown => "unknown",
            PushErrorKind::PermissionDenied => "permission_denied",
            PushErrorKind::RegistrationFailed => "registration_failed",
            PushErrorKind::UnregistrationFailed => "unregistration_failed",
        }
    }
}

/// Push Client Error Types
///
/// Synchronous failures only: input validation and token-wait outcomes.
/// Asynchronous platform failures never surface here; they are reported
/// through `DispatchEvent::Error`.
#[derive(Error, Debug)]
pub enum PushError {
    #[error("invalid topic name: {0:?}")]
    InvalidTopic(String),

    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),

    #[error("registration failed ({kind:?}): {message}")]
    Registration { kind: PushErrorKind, message: String },
}

impl PushError {
    /// The taxonomy kind for registration failures, `None` for validation
    /// errors.
    pub fn kind(&self) -> Option<PushErrorKind> {
        match self {
            PushError::Registration { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PushError>;
