//! The handoff artifact between transformation and training.

use sprs::CsMat;
use vispam_model::Label;

use crate::text::Fidelity;
use crate::vectorize::TfidfVectorizer;

/// One row after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedMessage {
    /// Normalized, segmented text.
    pub text: String,
    pub label: Label,
    /// Whether normalization ran fully or fell back.
    pub fidelity: Fidelity,
}

/// Everything the training stage consumes, produced in one shot by
/// [`crate::pipeline::transform_dataset`].
///
/// Created fresh per run and read-only afterwards. The vectorizer and the
/// test-side artifacts are the parts that must outlive the run: serving
/// applies the identical fitted vocabulary to new inputs.
#[derive(Debug, Clone)]
pub struct TransformationState {
    /// The cleaned dataset, one entry per surviving input row.
    pub cleaned: Vec<CleanedMessage>,
    /// Normalized texts of the training partition, in dataset order.
    pub train_texts: Vec<String>,
    /// Normalized texts of the held-out partition, in dataset order.
    pub test_texts: Vec<String>,
    pub train_labels: Vec<Label>,
    pub test_labels: Vec<Label>,
    /// TF-IDF features of the training partition, one row per record.
    pub train_features: CsMat<f64>,
    /// TF-IDF features of the held-out partition.
    pub test_features: CsMat<f64>,
    /// The fitted vectorizer (vocabulary + idf weights).
    pub vectorizer: TfidfVectorizer,
}

impl TransformationState {
    /// Training labels under the fixed spam=0 / ham=1 encoding.
    #[must_use]
    pub fn encoded_train_labels(&self) -> Vec<u8> {
        self.train_labels.iter().map(|l| l.encode()).collect()
    }

    /// Held-out labels under the fixed spam=0 / ham=1 encoding.
    #[must_use]
    pub fn encoded_test_labels(&self) -> Vec<u8> {
        self.test_labels.iter().map(|l| l.encode()).collect()
    }

    /// Number of rows that fell back to partial normalization.
    #[must_use]
    pub fn degraded_rows(&self) -> usize {
        self.cleaned
            .iter()
            .filter(|m| m.fidelity.is_degraded())
            .count()
    }
}
