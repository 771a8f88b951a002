//! Errors in the library.
use thiserror::Error;

/// Errors raised when reading values back out of a [`Record`](crate::record::Record).
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    /// The record has no value under the key.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// The value under the key has another type than requested.
    #[error("Record value type error: expected {0}")]
    RecordValueTypeError(String),
}
