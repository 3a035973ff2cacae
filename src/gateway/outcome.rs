//! Call outcome types.

use serde_json::Value;
use std::fmt;

/// Why a call fell back to the task's static default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// Input did not match the task's declared shape; the backend was never
    /// called.
    ValidationFailure,
    /// The backend could not be reached, rejected the request, errored, or
    /// timed out.
    TransportFailure,
    /// The backend answered, but the content does not parse into the declared
    /// output shape.
    SchemaMismatch,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FallbackReason::ValidationFailure => "validation_failure",
            FallbackReason::TransportFailure => "transport_failure",
            FallbackReason::SchemaMismatch => "schema_mismatch",
        };
        f.write_str(s)
    }
}

/// Result of one structured call: either schema-conforming model output, or
/// the task's static fallback value plus the reason generation was abandoned.
///
/// There is no third shape. Callers can always render the carried fields;
/// the reason is for diagnostics, never a blocking error.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Success {
        fields: Value,
    },
    Fallback {
        value: Value,
        reason: FallbackReason,
    },
}

impl GenerationOutcome {
    /// The output fields, whichever arm this is.
    pub fn fields(&self) -> &Value {
        match self {
            GenerationOutcome::Success { fields } => fields,
            GenerationOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_fields(self) -> Value {
        match self {
            GenerationOutcome::Success { fields } => fields,
            GenerationOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            GenerationOutcome::Success { .. } => None,
            GenerationOutcome::Fallback { reason, .. } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_from_either_arm() {
        let success = GenerationOutcome::Success {
            fields: json!({"sentiment": "Positive"}),
        };
        assert_eq!(success.fields()["sentiment"], "Positive");
        assert!(!success.is_fallback());
        assert_eq!(success.fallback_reason(), None);

        let fallback = GenerationOutcome::Fallback {
            value: json!({"sentiment": "Neutral"}),
            reason: FallbackReason::TransportFailure,
        };
        assert_eq!(fallback.fields()["sentiment"], "Neutral");
        assert!(fallback.is_fallback());
        assert_eq!(
            fallback.fallback_reason(),
            Some(FallbackReason::TransportFailure)
        );
    }

    #[test]
    fn reason_display() {
        assert_eq!(FallbackReason::ValidationFailure.to_string(), "validation_failure");
        assert_eq!(FallbackReason::TransportFailure.to_string(), "transport_failure");
        assert_eq!(FallbackReason::SchemaMismatch.to_string(), "schema_mismatch");
    }
}
