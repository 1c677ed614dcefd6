use std::fmt;

use curator_core::{AssociationTarget, EntityId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    InvalidPayload,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::InvalidPayload => write!(f, "invalid payload"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Transport failure or non-2xx answer from the remote store.
///
/// `reason` holds the server supplied `error` field when the body had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub kind: FailureKind,
    pub message: String,
    pub reason: Option<String>,
}

impl RemoteError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason.filter(|r| !r.trim().is_empty());
        self
    }

    /// The server's own explanation when it gave one, otherwise the transport message.
    pub fn user_message(&self) -> &str {
        self.reason.as_deref().unwrap_or(&self.message)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {}", self.message, reason),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// The current association set could not be read; nothing was changed.
    #[error("could not list tags of {target} {entity_id}: {source}")]
    Aborted {
        target: AssociationTarget,
        entity_id: EntityId,
        #[source]
        source: RemoteError,
    },
}
