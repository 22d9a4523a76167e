//! Text normalization for Vietnamese messages.
//!
//! The steps run in a fixed order, and each later step assumes the earlier
//! ones: lowercase, strip diacritics, keep only word characters and
//! whitespace, drop digits, then join compound words. Diacritic stripping
//! deliberately loses information (many senders type without accents, and
//! folding both spellings together is what makes them match), so
//! normalization is one-way; re-applying it to an already-normalized string
//! is a no-op.

use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use vispam_model::NormalizerOptions;

use crate::segment::Segmenter;

/// Whether an output is the product of the full normalization chain or a
/// best-effort fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fidelity {
    /// Every normalization step ran.
    Full,
    /// A step was skipped; the text is partially normalized.
    Degraded {
        /// What was skipped and why.
        reason: String,
    },
}

impl Fidelity {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Output of [`TextNormalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Lowercase ASCII letters, `_` joiners, and single spaces.
    pub text: String,
    pub fidelity: Fidelity,
}

/// Normalizes raw message text into the cleaned, segmented form the
/// vectorizer consumes.
///
/// Normalization is a pure function of the input text: no external state,
/// no side effects beyond logging. A row can degrade but never fail, so one
/// bad message cannot abort a dataset pass.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    options: NormalizerOptions,
    segmenter: Segmenter,
}

impl TextNormalizer {
    #[must_use]
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            options,
            segmenter: Segmenter::new(),
        }
    }

    /// Replace the default segmenter (e.g. with an extended lexicon).
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Run the full normalization chain on one message.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let text = raw.to_lowercase();
        let text = strip_diacritics(&text);
        let text = keep_word_chars(&text);
        let text = drop_digits(&text);

        let token_count = text.split_whitespace().count();
        if token_count > self.options.max_segment_tokens {
            let reason = format!(
                "segmentation skipped: {token_count} tokens exceed the {} token limit",
                self.options.max_segment_tokens
            );
            warn!(token_count, "{reason}");
            // Return the text as it stood before the skipped step, with
            // whitespace collapsed so the output alphabet stays closed.
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            return NormalizedText {
                text: collapsed,
                fidelity: Fidelity::Degraded { reason },
            };
        }

        NormalizedText {
            text: self.segmenter.segment(&text),
            fidelity: Fidelity::Full,
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizerOptions::default())
    }
}

/// Transliterate accented characters to their unaccented base form.
///
/// NFD decomposition followed by dropping combining marks covers every
/// Vietnamese vowel form; `đ` does not decompose and is mapped explicitly.
fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect()
}

/// Keep word characters (ASCII alphanumerics and `_`) and whitespace.
fn keep_word_chars(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

fn drop_digits(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vietnamese_diacritics() {
        assert_eq!(strip_diacritics("trúng thưởng"), "trung thuong");
        assert_eq!(strip_diacritics("điện thoại"), "dien thoai");
        assert_eq!(strip_diacritics("Đặng"), "Dang");
    }

    #[test]
    fn keeps_word_chars_only() {
        assert_eq!(keep_word_chars("a!b?c_d e"), "abc_d e");
        assert_eq!(keep_word_chars("gia: 5.000d"), "gia 5000d");
    }

    #[test]
    fn normalizes_prize_message() {
        let normalizer = TextNormalizer::default();
        let out = normalizer.normalize("Trúng thưởng 100 triệu!!!");
        assert_eq!(out.text, "trung_thuong trieu");
        assert_eq!(out.fidelity, Fidelity::Full);
    }

    #[test]
    fn normalization_is_a_pure_function() {
        let normalizer = TextNormalizer::default();
        let a = normalizer.normalize("Khuyến mãi 50%");
        let b = normalizer.normalize("Khuyến mãi 50%");
        assert_eq!(a, b);
        assert_eq!(a.text, "khuyen_mai");
    }

    #[test]
    fn second_application_is_a_no_op() {
        let normalizer = TextNormalizer::default();
        let once = normalizer.normalize("Miễn phí nạp thẻ, gọi 1900!").text;
        let twice = normalizer.normalize(&once).text;
        assert_eq!(once, twice);
    }

    #[test]
    fn token_guard_degrades_instead_of_segmenting() {
        let options = NormalizerOptions::new().with_max_segment_tokens(3);
        let normalizer = TextNormalizer::new(options);
        let out = normalizer.normalize("trúng thưởng lớn nhất năm");
        assert!(out.fidelity.is_degraded());
        // Pre-segmentation text: compounds stay unjoined.
        assert_eq!(out.text, "trung thuong lon nhat nam");
    }

    #[test]
    fn degraded_output_still_normalizes_cleanly() {
        let options = NormalizerOptions::new().with_max_segment_tokens(3);
        let normalizer = TextNormalizer::new(options);
        let out = normalizer.normalize("Trúng!! thưởng 99 lớn nhất năm");
        assert!(out.fidelity.is_degraded());
        for c in out.text.chars() {
            assert!(c.is_ascii_lowercase() || c == '_' || c == ' ', "unexpected char {c:?}");
        }
    }

    #[test]
    fn empty_and_symbol_only_inputs_produce_empty_text() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("").text, "");
        assert_eq!(normalizer.normalize("!!! 123 ???").text, "");
    }
}
