//! Error types
//!
//! Fetch, tag lookup, attribute assignment, and read failures are kept as
//! separate enums so callers can tell which stage failed. The CLI wraps all
//! of them in `anyhow`.

use thiserror::Error;

/// Outcome of a failed share fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The API answered 404 for the requested share.
    #[error("share not found")]
    NotFound,

    /// The API answered with a non-success status other than 404.
    #[error("VPC API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// No response was received (network failure, timeout, cancellation).
    #[error("no response from the VPC API: {0}")]
    Transport(String),

    /// A success status came back with a body that could not be decoded.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

/// Failure of a single tag listing. Never fatal to a read.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("tagging API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("no response from the tagging API: {0}")]
    Transport(String),

    #[error("invalid tagging response: {0}")]
    InvalidResponse(String),

    #[error("tag lookup timed out")]
    Timeout,
}

/// A value could not be stored in a [`crate::attributes::ResourceData`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("attribute {0:?} is not declared in the schema")]
    UnknownAttribute(String),

    #[error("attribute {name:?} expects {expected}, got {found}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Fatal outcome of a source-share read.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("share_replica must be set to a non-empty replica share identifier")]
    MissingShareReplica,

    #[error("failed to reach the VPC API while reading the source share: {0}")]
    Transport(String),

    #[error("VPC API returned {status} while reading the source share: {message}")]
    Api { status: u16, message: String },

    #[error("VPC API returned an unreadable source share: {0}")]
    InvalidResponse(String),

    #[error("error setting {field}: {source}")]
    FieldAssignment {
        field: &'static str,
        #[source]
        source: AssignError,
    },
}

impl ReadError {
    /// Name of the attribute that failed to assign, if this is an assignment failure.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::FieldAssignment { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<FetchError> for ReadError {
    fn from(err: FetchError) -> Self {
        match err {
            // Callers handle NotFound before converting; treat a stray one as an API 404.
            FetchError::NotFound => Self::Api {
                status: 404,
                message: "share not found".to_string(),
            },
            FetchError::Api { status, message } => Self::Api { status, message },
            FetchError::Transport(msg) => Self::Transport(msg),
            FetchError::InvalidResponse(msg) => Self::InvalidResponse(msg),
        }
    }
}
