use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Failures that abort instantiating a style. Malformed individual setting values are
/// never reported here: generators keep their previous value and carry on.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ShapeError {
    // Registry
    #[error("Unknown generator name: {0}")]
    UnknownGeneratorName(String),

    // Persistence
    #[error("Malformed settings envelope: {0}")]
    MalformedSettingsEnvelope(String),
}

impl ShapeError {
    pub(crate) fn malformed(reason: impl ToString) -> Self {
        Self::MalformedSettingsEnvelope(reason.to_string())
    }
}

pub type ShapeResult<T> = Result<T, ShapeError>;

#[cfg(test)]
mod error_tests {
    use super::ShapeError;

    #[test]
    fn test_display() {
        let err = ShapeError::UnknownGeneratorName("blob".to_string());
        assert_eq!(err.to_string(), "Unknown generator name: blob");
        let err = ShapeError::malformed("missing type");
        assert_eq!(err.to_string(), "Malformed settings envelope: missing type");
    }
}
