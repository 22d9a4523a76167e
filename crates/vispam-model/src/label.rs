//! The closed spam/ham label vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Message class label.
///
/// The encoding is fixed and total over the two-element vocabulary:
/// `Spam -> 0`, `Ham -> 1`. Parsing trims surrounding whitespace and is
/// ASCII-case-insensitive; any other value is rejected with [`LabelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    /// Unsolicited message.
    Spam,
    /// Clean message.
    Ham,
}

impl Label {
    /// Integer encoding consumed by the training stage.
    #[must_use]
    pub fn encode(self) -> u8 {
        match self {
            Self::Spam => 0,
            Self::Ham => 1,
        }
    }

    /// Inverse of [`Label::encode`].
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Spam),
            1 => Some(Self::Ham),
            _ => None,
        }
    }

    /// Canonical lowercase form, as it appears in datasets.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Ham => "ham",
        }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("spam") {
            Ok(Self::Spam)
        } else if trimmed.eq_ignore_ascii_case("ham") {
            Ok(Self::Ham)
        } else {
            Err(LabelError::new(trimmed))
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
