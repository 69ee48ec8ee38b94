use thiserror::Error;

/// Platform Messaging Error Types
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("device registration request failed: {0}")]
    Registration(String),

    #[error("device unregistration request failed: {0}")]
    Unregistration(String),

    #[error("notification permission denied")]
    PermissionDenied,

    #[error("subscribe failed for topic {0}: {1}")]
    Subscribe(String, String),

    #[error("unsubscribe failed for topic {0}: {1}")]
    Unsubscribe(String, String),

    #[error("device group send failed: {0}")]
    GroupSend(String),

    #[error("internal platform error")]
    Internal,
}

impl From<PlatformError> for String {
    fn from(err: PlatformError) -> Self {
        err.to_string()
    }
}
