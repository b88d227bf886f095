//! Response reconstruction error kinds and error value helpers.
//!
//! ```rust
//! use fresponse::{ResponseError, ResponseErrorKind};
//!
//! let empty = ResponseError::invalid_state("response has no messages");
//! assert_eq!(empty.kind, ResponseErrorKind::InvalidState);
//! assert!(!empty.is_cancelled());
//!
//! let cancelled = ResponseError::cancelled("stopped while awaiting update 3");
//! assert!(cancelled.is_cancelled());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseErrorKind {
    InvalidArgument,
    InvalidState,
    Cancelled,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    pub kind: ResponseErrorKind,
    pub message: String,
}

impl ResponseError {
    pub fn new(kind: ResponseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ResponseErrorKind::InvalidArgument, message)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ResponseErrorKind::InvalidState, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ResponseErrorKind::Cancelled, message)
    }

    pub fn source(message: impl Into<String>) -> Self {
        Self::new(ResponseErrorKind::Source, message)
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ResponseErrorKind::Cancelled
    }
}

impl Display for ResponseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ResponseError {}

impl From<serde_json::Error> for ResponseError {
    fn from(value: serde_json::Error) -> Self {
        ResponseError::invalid_argument(value.to_string())
    }
}
