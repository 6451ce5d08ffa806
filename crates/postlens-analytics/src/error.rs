use thiserror::Error;

/// A raw post that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ConversionError {
    /// Name of the offending raw field.
    pub field: &'static str,
    pub reason: String,
}

impl ConversionError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
