use relocator_signature::SignatureError;
use thiserror::Error;

use crate::slot::ParamSlot;

/// Errors raised while constructing references or registering mappings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectError {
    #[error("index error: {0} is not valid for parameter index")]
    IndexOutOfRange(i64),

    #[error(
        "type error: {slot} mismatches the reference: expected '{expected}' but was '{}'",
        .actual.as_deref().unwrap_or("nothing")
    )]
    ParameterMismatch {
        slot: ParamSlot,
        expected: &'static str,
        /// `None` when the slot does not exist.
        actual: Option<String>,
    },

    #[error("{reference} will never return a {expected} instance")]
    NotA {
        reference: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

pub type Result<T> = std::result::Result<T, ReflectError>;
