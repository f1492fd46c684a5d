//! Error types for decoration and call interception
//!
//! Every failure the crate can produce is an [`InterceptError`]. Errors are
//! raised eagerly: malformed decorator or validator arguments fail at
//! decoration time, everything else fails synchronously during the call
//! that triggered it. Nothing is retried or suppressed.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_intercept::error::InterceptError;
//!
//! let error = InterceptError::validation(1, "Type int expected but got str");
//! assert!(error.is_validation());
//! assert_eq!(error.index(), Some(1));
//! ```

/// Boxed error returned by user supplied function bodies and transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type InterceptResult<T> = Result<T, InterceptError>;

// ============================================================================
// INTERCEPT ERROR
// ============================================================================

/// Unified error type for decoration and call interception.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum InterceptError {
    /// Malformed decorator, validator or signature arguments.
    ///
    /// Always raised at decoration time, never deferred to a call.
    #[error("invalid construction: {0}")]
    Construction(String),

    /// The number of parser items does not match the number of arguments.
    ///
    /// Signals a binding inconsistency rather than a bad argument, so no
    /// position is attached.
    #[error("expected {expected} arguments but got {actual}")]
    Arity { expected: usize, actual: usize },

    /// An argument was rejected by its validator.
    #[error("argument {index} failed validation: {message}")]
    Validation { index: usize, message: String },

    /// A transform failed while converting an argument or an output value.
    #[error("value {index} could not be parsed: {message}")]
    Parsing { index: usize, message: String },

    /// Call arguments could not be bound to the wrapped function's signature.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// The wrapped function body itself failed.
    #[error("wrapped function failed: {0}")]
    Call(#[source] BoxError),
}

impl InterceptError {
    /// Creates a construction error.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Creates a validation error for the argument at `index`.
    pub fn validation(index: usize, message: impl Into<String>) -> Self {
        Self::Validation {
            index,
            message: message.into(),
        }
    }

    /// Creates a parsing error for the value at `index`.
    pub fn parsing(index: usize, message: impl Into<String>) -> Self {
        Self::Parsing {
            index,
            message: message.into(),
        }
    }

    /// Returns the zero-based position of the failing value, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Validation { index, .. } | Self::Parsing { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the per-position failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Validation { message, .. } | Self::Parsing { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns true for validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for parsing failures.
    #[must_use]
    pub fn is_parsing(&self) -> bool {
        matches!(self, Self::Parsing { .. })
    }

    /// Returns true for decoration-time failures.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }
}

// ============================================================================
// SIGNATURE ERROR
// ============================================================================

/// Failure to bind arguments against a [`Signature`](crate::signature::Signature).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SignatureError {
    /// More positional arguments than declared parameters.
    #[error("too many positional arguments: expected at most {expected}, got {actual}")]
    TooManyPositional { expected: usize, actual: usize },

    /// A parameter without default received no value.
    #[error("missing a required argument: '{name}'")]
    Missing { name: String },

    /// A keyword argument names no declared parameter.
    #[error("got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword { name: String },

    /// A parameter received both a positional and a keyword value.
    #[error("multiple values for argument '{name}'")]
    MultipleValues { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_accessors() {
        let error = InterceptError::validation(2, "bad");
        assert!(error.is_validation());
        assert!(!error.is_parsing());
        assert_eq!(error.index(), Some(2));
        assert_eq!(error.message(), Some("bad"));
    }

    #[test]
    fn test_arity_has_no_position() {
        let error = InterceptError::Arity {
            expected: 2,
            actual: 3,
        };
        assert_eq!(error.index(), None);
        assert_eq!(error.to_string(), "expected 2 arguments but got 3");
    }

    #[test]
    fn test_signature_error_is_transparent() {
        let error: InterceptError = SignatureError::Missing { name: "b".into() }.into();
        assert_eq!(error.to_string(), "missing a required argument: 'b'");
    }

    #[test]
    fn test_call_error_keeps_source() {
        use std::error::Error;

        let inner: BoxError = "division by zero".into();
        let error = InterceptError::Call(inner);
        assert!(error.source().is_some());
        assert!(error.to_string().contains("division by zero"));
    }
}
