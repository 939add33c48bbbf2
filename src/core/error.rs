//! Error types for compositor operations

use thiserror::Error;

/// Compositor error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A client or screen was given a zero dimension
    #[error("invalid size {width}x{height}: both dimensions must be at least 1")]
    InvalidSize { width: usize, height: usize },

    /// Wholesale content replacement with the wrong dimensions
    #[error(
        "content is {found_cols}x{found_rows} but the buffer is {expected_cols}x{expected_rows}"
    )]
    ContentMismatch {
        expected_cols: usize,
        expected_rows: usize,
        found_cols: usize,
        found_rows: usize,
    },

    /// Line overlay outside the buffer height
    #[error("line {index} is out of range for a buffer with {rows} rows")]
    LineOutOfRange { index: usize, rows: usize },

    /// The client already belongs to another screen
    #[error("client is already attached to another screen")]
    AlreadyAttached,
}

/// Result type for compositor operations
pub type Result<T> = std::result::Result<T, Error>;
