//! Labeled message rows.

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// Canonical name of the message-text column.
pub const TEXT_COLUMN: &str = "text";

/// Canonical name of the label column.
pub const LABEL_COLUMN: &str = "label";

/// One labeled message as it leaves ingestion.
///
/// Both fields are guaranteed present: rows with a missing text or label are
/// dropped before records are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Raw message text, untouched by normalization.
    pub text: String,
    /// Validated class label.
    pub label: Label,
}

impl MessageRecord {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}
