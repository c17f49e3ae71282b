use std::fmt;
use std::time::Duration;

use bytes::Bytes;

pub type Ticket = u64;
pub type ImageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEndpoint {
    Reset,
    Flush,
}

impl ControlEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            ControlEndpoint::Reset => "./reset",
            ControlEndpoint::Flush => "./flush",
        }
    }
}

/// One decoded answer of the content endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// May be empty; callers skip such records.
    pub uri: String,
    pub is_generic: bool,
    pub crawler: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ContentFetched {
        ticket: Ticket,
        result: Result<ImageRecord, FetchError>,
    },
    AssetLoaded {
        image_id: ImageId,
        result: Result<FetchMetadata, FetchError>,
    },
    /// `Ok(None)` means the server answered without a usable delay.
    ControlCompleted {
        endpoint: ControlEndpoint,
        ticket: Ticket,
        result: Result<Option<Duration>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Bytes,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Malformed,
    Cancelled,
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
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
