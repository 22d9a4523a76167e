//! Configuration options for the transformation stage.
//!
//! All defaults mirror the values the pipeline was tuned with: a 70/30
//! stratified split seeded at 42, and a unigram+bigram TF-IDF vocabulary
//! capped at 5000 features with a document-frequency floor of 2.

use serde::{Deserialize, Serialize};

/// Options for the text normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerOptions {
    /// Inputs with more whitespace tokens than this skip word segmentation
    /// and are reported as degraded instead of stalling the batch.
    pub max_segment_tokens: usize,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            max_segment_tokens: 10_000,
        }
    }
}

impl NormalizerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation token guard.
    #[must_use]
    pub fn with_max_segment_tokens(mut self, limit: usize) -> Self {
        self.max_segment_tokens = limit;
        self
    }
}

/// Options for the stratified train/test split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Fraction of each label class held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the per-class shuffle. The split is deterministic for a
    /// fixed seed and a fixed input ordering.
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.3,
            seed: 42,
        }
    }
}

impl SplitOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the held-out fraction (clamped to `(0.0, 1.0)` at use).
    #[must_use]
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Options for the TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerOptions {
    /// Inclusive span of token-group sizes to index. The default `(1, 2)`
    /// captures segmented compounds next to each other as bigrams.
    pub ngram_range: (usize, usize),
    /// Terms appearing in fewer than this many training documents are
    /// dropped from the vocabulary.
    pub min_document_frequency: usize,
    /// Cap on vocabulary size; the highest-corpus-frequency terms are kept.
    /// `None` leaves the vocabulary unbounded.
    pub max_features: Option<usize>,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            min_document_frequency: 2,
            max_features: Some(5000),
        }
    }
}

impl VectorizerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive n-gram span. Both ends are raised to at least 1
    /// and the range is reordered if inverted.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        let lo = min_n.max(1);
        let hi = max_n.max(1);
        self.ngram_range = (lo.min(hi), lo.max(hi));
        self
    }

    /// Set the document-frequency floor.
    #[must_use]
    pub fn with_min_document_frequency(mut self, min_df: usize) -> Self {
        self.min_document_frequency = min_df;
        self
    }

    /// Set or clear the vocabulary cap.
    #[must_use]
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }
}

/// Aggregated options for the end-to-end transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub normalizer: NormalizerOptions,
    pub split: SplitOptions,
    pub vectorizer: VectorizerOptions,
}

impl TransformOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_normalizer(mut self, options: NormalizerOptions) -> Self {
        self.normalizer = options;
        self
    }

    #[must_use]
    pub fn with_split(mut self, options: SplitOptions) -> Self {
        self.split = options;
        self
    }

    #[must_use]
    pub fn with_vectorizer(mut self, options: VectorizerOptions) -> Self {
        self.vectorizer = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let options = TransformOptions::default();
        assert_eq!(options.split.test_fraction, 0.3);
        assert_eq!(options.split.seed, 42);
        assert_eq!(options.vectorizer.ngram_range, (1, 2));
        assert_eq!(options.vectorizer.min_document_frequency, 2);
        assert_eq!(options.vectorizer.max_features, Some(5000));
    }

    #[test]
    fn ngram_range_is_sanitized() {
        let options = VectorizerOptions::new().with_ngram_range(3, 0);
        assert_eq!(options.ngram_range, (1, 3));
    }
}
