//! TF-IDF feature extraction.
//!
//! Numeric semantics, fixed and documented because the downstream model
//! depends on them:
//!
//! - term frequency is the raw in-document count
//! - idf is smoothed: `ln((1 + n_docs) / (1 + df)) + 1`
//! - every row vector IS L2-normalized
//!
//! N-grams join their constituent tokens with a single space; the `_`
//! joiner only ever comes from word segmentation, so a bigram of two
//! compounds ("trung_thuong khuyen_mai") cannot collide with a unigram.
//!
//! The vocabulary is fitted exclusively on the training split and is never
//! adjusted afterwards; test and inference inputs are only projected
//! through the fixed mapping.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use sprs::{CsMat, TriMat};
use tracing::debug;
use vispam_model::VectorizerOptions;

use crate::error::{Result, TransformError};

/// The fitted vocabulary and its idf weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedVocabulary {
    /// Terms in column order (lexicographic).
    terms: Vec<String>,
    /// Term to column index.
    index: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
    /// Size of the training corpus the vocabulary was fitted on.
    n_documents: usize,
}

impl FittedVocabulary {
    /// Terms in column order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Column index of a term, if indexed.
    #[must_use]
    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Idf weight per column.
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Training corpus size.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

/// TF-IDF vectorizer over whitespace-tokenized, pre-normalized text.
///
/// Serializable so the fitted vocabulary can be persisted and reused at
/// serving time: applying anything but the identical fitted mapping to new
/// inputs would skew serving away from training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    options: VectorizerOptions,
    fitted: Option<FittedVocabulary>,
}

impl TfidfVectorizer {
    #[must_use]
    pub fn new(options: VectorizerOptions) -> Self {
        Self {
            options,
            fitted: None,
        }
    }

    /// The options the vectorizer was configured with.
    #[must_use]
    pub fn options(&self) -> &VectorizerOptions {
        &self.options
    }

    /// The fitted vocabulary, if any.
    #[must_use]
    pub fn vocabulary(&self) -> Option<&FittedVocabulary> {
        self.fitted.as_ref()
    }

    /// Learn the vocabulary and idf weights from the training documents and
    /// project them into feature rows.
    ///
    /// # Errors
    ///
    /// [`TransformError::EmptyVocabulary`] if `documents` is empty or no
    /// term meets the document-frequency floor.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<CsMat<f64>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Project documents through the fitted vocabulary.
    ///
    /// Lookup-only: unseen terms are ignored, document frequencies are not
    /// updated. An empty input produces a matrix with zero rows.
    ///
    /// # Errors
    ///
    /// [`TransformError::NotFitted`] if called before [`Self::fit_transform`].
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<CsMat<f64>> {
        let fitted = self.fitted.as_ref().ok_or(TransformError::NotFitted)?;

        let mut triplets = TriMat::new((documents.len(), fitted.len()));
        for (row, doc) in documents.iter().enumerate() {
            // BTreeMap keeps columns sorted within the row.
            let mut weighted: BTreeMap<usize, f64> = BTreeMap::new();
            for (term, count) in term_counts(doc.as_ref(), self.options.ngram_range) {
                if let Some(col) = fitted.column(&term) {
                    weighted.insert(col, count as f64 * fitted.idf[col]);
                }
            }
            let norm = weighted.values().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (col, value) in weighted {
                    triplets.add_triplet(row, col, value / norm);
                }
            }
        }
        Ok(triplets.to_csr())
    }

    fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(TransformError::EmptyVocabulary);
        }

        let n_docs = documents.len();
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let counts = term_counts(doc.as_ref(), self.options.ngram_range);
            for (term, count) in counts {
                *corpus_freq.entry(term.clone()).or_insert(0) += count;
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let min_df = self.options.min_document_frequency;
        let mut selected: Vec<(String, usize)> = corpus_freq
            .into_iter()
            .filter(|(term, _)| doc_freq.get(term).copied().unwrap_or(0) >= min_df)
            .collect();
        if selected.is_empty() {
            return Err(TransformError::EmptyVocabulary);
        }

        // Keep the highest-corpus-frequency terms, ties lexicographic.
        selected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(cap) = self.options.max_features {
            selected.truncate(cap);
        }

        // Column order is lexicographic over the survivors.
        let mut terms: Vec<String> = selected.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                (((1 + n_docs) as f64) / ((1 + df) as f64)).ln() + 1.0
            })
            .collect();
        let index: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();

        debug!(
            vocabulary = terms.len(),
            documents = n_docs,
            "tf-idf vocabulary fitted"
        );

        self.fitted = Some(FittedVocabulary {
            terms,
            index,
            idf,
            n_documents: n_docs,
        });
        Ok(())
    }
}

/// Per-document term counts over the configured n-gram span.
fn term_counts(doc: &str, (lo, hi): (usize, usize)) -> HashMap<String, usize> {
    let tokens: Vec<&str> = doc.split_whitespace().collect();
    let mut counts = HashMap::new();
    for n in lo..=hi {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

/// Unique terms of a document under the given n-gram span.
#[cfg(test)]
fn term_set(doc: &str, range: (usize, usize)) -> std::collections::HashSet<String> {
    term_counts(doc, range).into_keys().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(docs: &[&str], options: VectorizerOptions) -> (TfidfVectorizer, CsMat<f64>) {
        let mut vectorizer = TfidfVectorizer::new(options);
        let matrix = vectorizer.fit_transform(docs).unwrap();
        (vectorizer, matrix)
    }

    #[test]
    fn term_counts_cover_unigrams_and_bigrams() {
        let counts = term_counts("a b a", (1, 2));
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
        assert_eq!(counts["a b"], 1);
        assert_eq!(counts["b a"], 1);
    }

    #[test]
    fn term_set_of_short_doc_skips_wide_ngrams() {
        let set = term_set("solo", (1, 2));
        assert_eq!(set.len(), 1);
        assert!(set.contains("solo"));
    }

    #[test]
    fn fit_transform_shapes_match_input() {
        let docs = ["mien_phi nap_the", "mien_phi khuyen_mai", "nap_the ngay"];
        let (vectorizer, matrix) = fitted(
            &docs,
            VectorizerOptions::new().with_min_document_frequency(1),
        );
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), vectorizer.vocabulary().unwrap().len());
    }

    #[test]
    fn min_df_drops_rare_terms() {
        let docs = ["chung chung hiem", "chung pho_bien", "chung pho_bien"];
        let (vectorizer, _) = fitted(&docs, VectorizerOptions::new().with_ngram_range(1, 1));
        let vocab = vectorizer.vocabulary().unwrap();
        // df("chung") = 3, df("pho_bien") = 2, df("hiem") = 1 < min_df 2.
        assert!(vocab.column("chung").is_some());
        assert!(vocab.column("pho_bien").is_some());
        assert!(vocab.column("hiem").is_none());
    }

    #[test]
    fn max_features_caps_the_vocabulary() {
        let docs = ["a a a b b c", "a b c d", "a b c d e"];
        let options = VectorizerOptions::new()
            .with_ngram_range(1, 1)
            .with_min_document_frequency(1)
            .with_max_features(Some(2));
        let (vectorizer, matrix) = fitted(&docs, options);
        assert_eq!(matrix.cols(), 2);
        let vocab = vectorizer.vocabulary().unwrap();
        // "a" and "b" carry the highest corpus frequencies.
        assert!(vocab.column("a").is_some());
        assert!(vocab.column("b").is_some());
    }

    #[test]
    fn rows_are_l2_normalized() {
        let docs = ["an an uong", "an uong ngu", "ngu ngon lanh"];
        let (_, matrix) = fitted(
            &docs,
            VectorizerOptions::new().with_min_document_frequency(1),
        );
        for row in 0..matrix.rows() {
            let norm: f64 = matrix
                .outer_view(row)
                .map(|r| r.iter().map(|(_, v)| v * v).sum::<f64>())
                .unwrap_or(0.0)
                .sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "row {row} has norm {norm}");
        }
    }

    #[test]
    fn transform_ignores_unseen_terms() {
        let (vectorizer, _) = fitted(
            &["quen thuoc roi", "quen thuoc lam"],
            VectorizerOptions::new().with_min_document_frequency(1),
        );
        let projected = vectorizer.transform(&["hoan toan moi la"]).unwrap();
        assert_eq!(projected.rows(), 1);
        assert_eq!(projected.nnz(), 0);
    }

    #[test]
    fn vocabulary_ignores_later_transform_input() {
        let train = ["giam_gia soc", "giam_gia lon", "mua ngay keo lo"];
        let (vectorizer, _) = fitted(
            &train,
            VectorizerOptions::new().with_min_document_frequency(1),
        );
        let before: Vec<String> = vectorizer.vocabulary().unwrap().terms().to_vec();
        let _ = vectorizer.transform(&["tu moi chua tung thay"]).unwrap();
        let after: Vec<String> = vectorizer.vocabulary().unwrap().terms().to_vec();
        assert_eq!(before, after);
    }

    #[test]
    fn transform_before_fit_is_rejected() {
        let vectorizer = TfidfVectorizer::new(VectorizerOptions::default());
        assert!(matches!(
            vectorizer.transform(&["bat ky"]),
            Err(TransformError::NotFitted)
        ));
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let mut vectorizer = TfidfVectorizer::new(VectorizerOptions::default());
        let empty: [&str; 0] = [];
        assert!(matches!(
            vectorizer.fit_transform(&empty),
            Err(TransformError::EmptyVocabulary)
        ));
    }

    #[test]
    fn unmet_frequency_floor_is_rejected() {
        // Every term appears in exactly one document; min_df 2 leaves nothing.
        let mut vectorizer = TfidfVectorizer::new(VectorizerOptions::default());
        assert!(matches!(
            vectorizer.fit_transform(&["mot hai", "ba bon"]),
            Err(TransformError::EmptyVocabulary)
        ));
    }

    #[test]
    fn column_order_is_deterministic() {
        let docs = ["b a c", "c a b"];
        let options = VectorizerOptions::new()
            .with_ngram_range(1, 1)
            .with_min_document_frequency(1);
        let (vectorizer, _) = fitted(&docs, options);
        assert_eq!(vectorizer.vocabulary().unwrap().terms(), ["a", "b", "c"]);
    }

    #[test]
    fn idf_weights_favor_rare_terms() {
        let docs = ["pho_bien hiem_hon", "pho_bien khac", "pho_bien hiem_hon"];
        let (vectorizer, _) = fitted(
            &docs,
            VectorizerOptions::new().with_min_document_frequency(1),
        );
        let vocab = vectorizer.vocabulary().unwrap();
        let common = vocab.idf()[vocab.column("pho_bien").unwrap()];
        let rarer = vocab.idf()[vocab.column("hiem_hon").unwrap()];
        assert!(rarer > common);
    }

    #[test]
    fn fitted_vectorizer_round_trips_through_serde() {
        let (vectorizer, _) = fitted(
            &["trung_thuong lon", "trung_thuong nho"],
            VectorizerOptions::new().with_min_document_frequency(1),
        );
        let json = serde_json::to_string(&vectorizer).unwrap();
        let restored: TfidfVectorizer = serde_json::from_str(&json).unwrap();
        let a = vectorizer.transform(&["trung_thuong lon"]).unwrap();
        let b = restored.transform(&["trung_thuong lon"]).unwrap();
        assert_eq!(a, b);
    }
}
