//! Framework error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers the failures
//! that can happen while building the primitive types in this crate.

use thiserror::Error;

/// The error type for `rr-core` parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}
