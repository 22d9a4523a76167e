//! Error types for the data model.

use thiserror::Error;

/// A label value outside the closed spam/ham vocabulary.
///
/// Label parsing fails fast instead of producing an unmapped encoded value,
/// so a mislabeled dataset aborts the run before it can corrupt a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label value '{value}': expected 'spam' or 'ham'")]
pub struct LabelError {
    /// The raw value that failed to parse.
    pub value: String,
}

impl LabelError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
