//! Error types for urpa-identifiers

use thiserror::Error;

/// Result type alias for identifier operations
pub type Result<T> = std::result::Result<T, IdentifierError>;

/// Reason an identifier was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Wrong number of digits
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: String, actual: usize },

    /// Character outside of 0-9
    #[error("Non-digit characters in '{0}'")]
    NonDigit(String),

    /// Separator present but not right after the date part, or repeated
    #[error("Misplaced separator")]
    MisplacedSeparator,

    /// Month field does not decode to 1-12
    #[error("Invalid month field: {0}")]
    InvalidMonth(u8),

    /// Day does not exist in the decoded month
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// Nine digit numbers were only issued until the end of 1953
    #[error("No 9 digit numbers after 1953, got year {0}")]
    NineDigitAfter1953(i32),

    /// Check digit does not match
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Input does not have the expected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Caller passed an argument outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
