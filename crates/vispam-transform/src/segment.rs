//! Dictionary-based Vietnamese word segmentation.
//!
//! Vietnamese writes multi-syllable lexical units with spaces between the
//! syllables, so "trúng thưởng" (to win a prize) is one word spread over two
//! whitespace tokens. After diacritic stripping, the segmenter re-detects
//! those compounds with a longest-match scan over a lexicon of accentless
//! compounds and joins their syllables with `_`, leaving every other token
//! unchanged. Tokens that already contain `_` can never match a lexicon
//! entry, so re-segmenting already-segmented text is a no-op.

use std::collections::HashSet;

/// Built-in compound lexicon, accent-stripped and lowercase.
///
/// Curated toward the message domain (promotions, banking, telco) with a
/// layer of everyday compounds. Entries are space-separated syllables.
const DEFAULT_LEXICON: &[&str] = &[
    // Promotions and prize bait
    "trung thuong",
    "giai thuong",
    "phan thuong",
    "qua tang",
    "khuyen mai",
    "mien phi",
    "giam gia",
    "uu dai",
    "hoan tien",
    "tri an",
    "may man",
    "chuc mung",
    "quay so",
    "xo so",
    "trung tuyen",
    "co hoi",
    "dac biet",
    "ngay lap tuc",
    "nhanh chong",
    "de dang",
    // Banking and payments
    "ngan hang",
    "tai khoan",
    "so du",
    "giao dich",
    "chuyen khoan",
    "rut tien",
    "nop tien",
    "tien mat",
    "thanh toan",
    "hoa don",
    "vay von",
    "lai suat",
    "tra gop",
    "tin dung",
    "the tin dung",
    "vi dien tu",
    "bao mat",
    "mat khau",
    "ma so",
    "xac nhan",
    "xac thuc",
    // Telco
    "tin nhan",
    "nhan tin",
    "dien thoai",
    "so dien thoai",
    "the cao",
    "nap the",
    "cuoc goi",
    "goi dien",
    "tong dai",
    "nha mang",
    "goi cuoc",
    "data toc do cao",
    // Commerce
    "khach hang",
    "san pham",
    "dich vu",
    "cua hang",
    "sieu thi",
    "mua sam",
    "dat hang",
    "giao hang",
    "van chuyen",
    "gia tri",
    "chuong trinh",
    "cong ty",
    "trung tam",
    "thuong hieu",
    // Online
    "truc tuyen",
    "ung dung",
    "phan mem",
    "cai dat",
    "cap nhat",
    "tai xuong",
    "duong dan",
    "bam vao",
    "nhan vao",
    "dang ky",
    "dang nhap",
    "thong tin",
    "ca cuoc",
    "dat cuoc",
    "bong da",
    // Everyday compounds
    "hom nay",
    "ngay mai",
    "thoi gian",
    "cong viec",
    "lam viec",
    "van phong",
    "gia dinh",
    "ban be",
    "suc khoe",
    "benh vien",
    "bac si",
    "y te",
    "bao hiem",
    "hoc sinh",
    "sinh vien",
    "truong hoc",
    "du lich",
    "ve may bay",
    "lien he",
    "ho tro",
    "tu van",
    "kiem tra",
    "hop dong",
    "phap luat",
    "cong an",
    "canh sat",
    "vi pham",
    "xu phat",
    "co the",
    "khong the",
    "vui long",
    "cam on",
    "xin chao",
];

/// Longest-match compound joiner.
///
/// Greedy left-to-right: at each token position the widest lexicon match
/// wins, its syllables are joined with `_`, and the scan resumes after it.
#[derive(Debug, Clone)]
pub struct Segmenter {
    compounds: HashSet<String>,
    max_words: usize,
}

impl Segmenter {
    /// Segmenter with the built-in lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self::from_entries(DEFAULT_LEXICON.iter().copied())
    }

    /// Segmenter built from an explicit lexicon, entries as space-separated
    /// syllable strings. Single-syllable entries are ignored.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compounds = HashSet::new();
        let mut max_words = 2;
        for entry in entries {
            let syllables: Vec<&str> = entry.as_ref().split_whitespace().collect();
            if syllables.len() < 2 {
                continue;
            }
            max_words = max_words.max(syllables.len());
            compounds.insert(syllables.join(" "));
        }
        Self {
            compounds,
            max_words,
        }
    }

    /// Extend the lexicon with additional compounds.
    #[must_use]
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let syllables: Vec<&str> = entry.as_ref().split_whitespace().collect();
            if syllables.len() < 2 {
                continue;
            }
            self.max_words = self.max_words.max(syllables.len());
            self.compounds.insert(syllables.join(" "));
        }
        self
    }

    /// Number of compounds in the lexicon.
    #[must_use]
    pub fn lexicon_size(&self) -> usize {
        self.compounds.len()
    }

    /// Join detected compounds with `_`, collapse whitespace runs to single
    /// spaces, and trim. Unmatched tokens pass through unchanged.
    #[must_use]
    pub fn segment(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let widest = self.max_words.min(tokens.len() - i);
            let mut advanced = 0;
            for width in (2..=widest).rev() {
                let candidate = tokens[i..i + width].join(" ");
                if self.compounds.contains(&candidate) {
                    out.push(tokens[i..i + width].join("_"));
                    advanced = width;
                    break;
                }
            }
            if advanced == 0 {
                out.push(tokens[i].to_string());
                advanced = 1;
            }
            i += advanced;
        }
        out.join(" ")
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}
