//! Error types for the transformation stage.

use polars::prelude::PolarsError;
use thiserror::Error;
use vispam_model::{Label, LabelError};

/// Errors that abort a transformation run.
///
/// Row-level text issues never surface here: normalization degrades
/// per-row and reports fidelity on the output instead. Everything in this
/// enum is a dataset-level structural problem, and the pipeline is
/// all-or-nothing, so any variant means no state was handed downstream.
#[derive(Debug, Error)]
pub enum TransformError {
    // === Dataset structure ===
    /// Expected column missing from the input frame.
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },

    /// Nothing left after dropping rows with missing values.
    #[error("dataset is empty after dropping rows with missing values")]
    EmptyDataset,

    /// A label value outside the closed spam/ham vocabulary.
    #[error(transparent)]
    UnknownLabel(#[from] LabelError),

    // === Splitting ===
    /// A label class is too small to stratify.
    #[error(
        "label class '{label}' has {count} example(s); at least {required} are required for a stratified split"
    )]
    InsufficientData {
        label: Label,
        count: usize,
        required: usize,
    },

    /// Test fraction outside the open interval (0, 1).
    #[error("test fraction {fraction} is outside (0, 1)")]
    InvalidTestFraction { fraction: f64 },

    // === Vectorization ===
    /// Fitting produced no vocabulary entries.
    #[error("vocabulary is empty: no term met the document-frequency threshold on the training split")]
    EmptyVocabulary,

    /// `transform` called before `fit_transform`.
    #[error("vectorizer is not fitted; call fit_transform on the training split first")]
    NotFitted,

    // === DataFrame engine ===
    /// Failed DataFrame operation.
    #[error("dataframe operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_display_names_the_class() {
        let err = TransformError::InsufficientData {
            label: Label::Spam,
            count: 1,
            required: 2,
        };
        assert!(err.to_string().contains("'spam'"));
        assert!(err.to_string().contains("1 example"));
    }

    #[test]
    fn label_error_passes_through() {
        let err: TransformError = LabelError::new("promo").into();
        assert_eq!(
            err.to_string(),
            "unknown label value 'promo': expected 'spam' or 'ham'"
        );
    }
}
