//! Error types for remote access

use std::time::Duration;
use thiserror::Error;

/// Failure of a remote operation.
///
/// The `Display` text is what ends up in the operator-facing error banner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Connection refused, DNS failure, TLS failure and similar
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// Non-2xx response; `message` comes from the body's `error` field
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The mutation was applied but the follow-up full read failed
    #[error("{0}")]
    Relist(Box<SyncError>),
}

impl SyncError {
    /// True when the remote collection changed even though the call failed
    pub fn mutation_applied(&self) -> bool {
        matches!(self, SyncError::Relist(_))
    }

    /// HTTP status of a remote rejection, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Remote { status, .. } => Some(*status),
            SyncError::Relist(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        match self {
            SyncError::MalformedResponse(_) => true,
            SyncError::Relist(inner) => inner.is_malformed(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SyncError::MalformedResponse(e.to_string())
        } else {
            SyncError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_is_banner_text() {
        let err = SyncError::Remote {
            status: 400,
            message: "Missing required fields".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required fields");
        assert_eq!(err.status(), Some(400));
        assert!(!err.mutation_applied());
    }

    #[test]
    fn test_relist_wraps_inner_error() {
        let err = SyncError::Relist(Box::new(SyncError::MalformedResponse(
            "expected array".to_string(),
        )));
        assert!(err.mutation_applied());
        assert!(err.is_malformed());
        assert_eq!(err.to_string(), "Malformed response: expected array");
    }

    #[test]
    fn test_timeout_display() {
        let err = SyncError::Timeout(Duration::from_millis(2500));
        assert_eq!(err.to_string(), "Request timed out after 2.5s");
    }
}
