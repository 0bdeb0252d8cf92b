//! Buffer access error types

use thiserror::Error;

/// Errors raised while reading or writing a bound region
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Access would touch bytes outside the region
    #[error("out of bounds: {len} bytes at index {index} (capacity {capacity})")]
    OutOfBounds {
        /// Absolute index of the first byte accessed
        index: usize,
        /// Number of bytes accessed
        len: usize,
        /// Capacity of the region
        capacity: usize,
    },

    /// Length prefix is negative, too large to encode, or runs past the region
    #[error("invalid length {length} at index {index} (capacity {capacity})")]
    InvalidLength {
        /// Absolute index of the length prefix
        index: usize,
        /// Decoded (or requested) length
        length: i64,
        /// Capacity of the region
        capacity: usize,
    },

    /// String field does not hold UTF-8 text
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
