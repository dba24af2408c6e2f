use thiserror::Error;

use crate::type_signature::Kind;

/// Errors raised while parsing or constructing signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid {reading}: {message} (at offset {offset})")]
    Malformed {
        /// What was being read, e.g. `type signature` or `class internal name`.
        reading: &'static str,
        message: String,
        /// Byte offset into the input where the problem was detected.
        offset: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Builder(#[from] BuilderStateError),

    #[error("wrong kind: {actual:?} signature is not a class type")]
    WrongKind { actual: Kind },

    #[error("index error: index {index} out of bounds (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Misuse of one of the signature builders.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderStateError {
    #[error("builder error: this builder has already been built")]
    AlreadyBuilt,

    #[error("builder error: {0} has already been specified")]
    AlreadySet(&'static str),

    #[error("builder error: {0} is not specified")]
    MissingRequired(&'static str),
}

impl SignatureError {
    pub(crate) fn malformed(reading: &'static str, message: impl Into<String>, offset: usize) -> Self {
        SignatureError::Malformed {
            reading,
            message: message.into(),
            offset,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        SignatureError::InvalidArgument(message.into())
    }

    /// Offset of a parse failure, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SignatureError::Malformed { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, SignatureError::Malformed { .. })
    }
}

pub type Result<T> = std::result::Result<T, SignatureError>;
