//! Core error types for alchemy-rs.
//!
//! [`OrmError`] is the single error enum shared by the ORM host layer and the
//! hybrid extension. Failures raised inside user-supplied attribute functions
//! are expected to use it too, so they propagate unchanged through `?`.

use thiserror::Error;

/// The primary error type for alchemy-rs.
#[derive(Error, Debug)]
pub enum OrmError {
    // ── Attribute access ─────────────────────────────────────────────

    /// An attribute is missing or was read as the wrong kind.
    #[error("Attribute error: {0}")]
    AttributeError(String),

    /// An attribute has no callable registered for the operation, e.g. a
    /// property assigned without a setter.
    #[error("Attribute error: can't {operation} attribute '{attribute}'")]
    MissingCallable {
        /// The attribute name.
        attribute: String,
        /// The operation attempted ("set" or "delete").
        operation: String,
    },

    // ── Expression evaluation ────────────────────────────────────────

    /// Operands of incompatible types were combined.
    #[error("Type error: {0}")]
    TypeError(String),

    /// Integer division by zero or overflow during in-memory evaluation.
    #[error("Arithmetic error: {0}")]
    ArithmeticError(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OrmError {
    /// Builds the error raised when an attribute has no callable for the
    /// requested operation (e.g. assigning to a property without a setter).
    pub fn missing_callable(attribute: &str, operation: &str) -> Self {
        Self::MissingCallable {
            attribute: attribute.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Returns `true` for [`OrmError::MissingCallable`].
    pub const fn is_missing_callable(&self) -> bool {
        matches!(self, Self::MissingCallable { .. })
    }
}

/// A convenience type alias for `Result<T, OrmError>`.
pub type OrmResult<T> = Result<T, OrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_callable_message() {
        let err = OrmError::missing_callable("length", "set");
        assert_eq!(err.to_string(), "Attribute error: can't set attribute 'length'");
        assert!(err.is_missing_callable());
        assert!(matches!(
            err,
            OrmError::MissingCallable { ref attribute, ref operation }
                if attribute == "length" && operation == "set"
        ));
    }

    #[test]
    fn test_plain_attribute_error_is_not_missing_callable() {
        let err = OrmError::AttributeError("no attribute 'foo'".into());
        assert!(!err.is_missing_callable());
        let err = OrmError::AttributeError("can't parse column 'x'".into());
        assert!(!err.is_missing_callable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            OrmError::TypeError("int + str".into()).to_string(),
            "Type error: int + str"
        );
        assert_eq!(
            OrmError::ArithmeticError("division by zero".into()).to_string(),
            "Arithmetic error: division by zero"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: OrmError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }
}
