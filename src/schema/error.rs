//! Error types for structural validation.

use std::fmt;

/// A single validation failure with the location that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What constraint was violated
    pub message: String,
    /// Dotted path to the offending value (e.g. `"technical_depth.score"`,
    /// `"logs[3]"`); empty for the root value
    pub path: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }

    /// An error on the root value.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(message, "")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of validating one value against one schema.
///
/// Either the value passed in full, or it was rejected with every violated
/// constraint listed. A value is never partially accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn rejected(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Formatted error strings, one per violated constraint.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        Self::rejected(vec![error])
    }
}
