use std::num::ParseIntError;

use thiserror::Error;

use crate::FIELD_COUNT;

/// Why a wire frame could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("expected {expected} fields, found {found}", expected = FIELD_COUNT)]
    FieldCount { found: usize },

    #[error("relay count is not a non-negative integer: {0}")]
    RelayCount(#[from] ParseIntError),

    #[error("unknown priority label {0:?}")]
    UnknownPriority(String),
}

pub type FrameResult<T> = Result<T, FrameError>;
