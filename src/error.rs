//! Error types for transform parsing and matrix operations

use std::fmt;

/// Error type for transform-string parsing and geometric operations
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Malformed or unrecognized transform string
    Parse(String),
    /// Inverse requested on a matrix whose determinant is numerically zero
    Singular,
    /// Non-finite or out-of-range scalar passed to a geometric operation
    InvalidArgument(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Parse(msg) => write!(f, "transform parse error: {}", msg),
            TransformError::Singular => write!(f, "matrix is not invertible"),
            TransformError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<String> for TransformError {
    fn from(msg: String) -> Self {
        TransformError::Parse(msg)
    }
}

impl From<&str> for TransformError {
    fn from(msg: &str) -> Self {
        TransformError::Parse(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = TransformError::Parse("unrecognized transform function `warp`".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("parse error"));
        assert!(msg.contains("warp"));
    }

    #[test]
    fn test_singular_error_display() {
        let msg = format!("{}", TransformError::Singular);
        assert!(msg.contains("not invertible"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = TransformError::InvalidArgument("non-finite angle".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("invalid argument"));
        assert!(msg.contains("non-finite"));
    }

    #[test]
    fn test_from_str() {
        let err: TransformError = "bad input".into();
        assert_eq!(err, TransformError::Parse("bad input".to_string()));
    }
}
