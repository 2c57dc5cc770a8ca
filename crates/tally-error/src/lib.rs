// Tally Error Handling Framework
// Central location for the error types shared by the resource record crates

use thiserror::Error;

// Re-export common error handling tools for convenience
pub use anyhow;
pub use thiserror;

/// Result alias used throughout the Tally crates
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors surfaced by the resource record API.
///
/// These are the recoverable conditions a caller is expected to handle.
/// Fatal conditions (a memory or vcores value that no longer fits a 32-bit
/// signed integer after unit conversion, or a registry-guaranteed entry
/// going missing) are not represented here: they panic at the point of
/// detection and propagate unchanged, because a record in that state cannot
/// be safely consumed by the rest of the system.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RecordError {
    /// A mutator was handed an empty or missing argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A strict accessor or mutator referenced an undefined entry name.
    /// Expected in normal control flow; callers probe for it.
    #[error("resource {0} not found")]
    NotFound(String),

    /// The injected registry supplied no resource types. A record cannot be
    /// constructed without at least the mandatory memory and vcores types.
    #[error("resource type registry returned no types")]
    EmptyRegistry,

    /// Wire encode/decode failure from the codec layer
    #[error("codec error: {0}")]
    Codec(String),
}

impl RecordError {
    /// Build a not-found error for the given entry name
    pub fn not_found(name: impl Into<String>) -> Self {
        RecordError::NotFound(name.into())
    }

    /// Build an invalid-argument error with the given message
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        RecordError::InvalidArgument(msg.into())
    }
}

/// Errors from the pure unit conversion function.
///
/// Conversion is total over the unit symbols the system recognizes; these
/// cover the two ways a call can still fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The unit symbol is not one the converter recognizes
    #[error("unknown unit symbol {0:?}")]
    UnknownUnit(String),

    /// The converted value does not fit in a 64-bit signed integer
    #[error("converting {value} from {from:?} to {to:?} overflows i64")]
    Overflow {
        from: String,
        to: String,
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RecordError::not_found("gpu");
        assert_eq!(err.to_string(), "resource gpu not found");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = RecordError::invalid_argument("resource name cannot be empty");
        assert!(err.to_string().contains("invalid argument"));
    }

    #[test]
    fn test_unit_error_display() {
        let err = UnitError::UnknownUnit("Zi".to_string());
        assert!(err.to_string().contains("Zi"));
    }
}
