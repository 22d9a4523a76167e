//! End-to-end transformation over a labeled dataset.
//!
//! Stages, in order:
//!
//! 1. Extract the text/label columns, dropping rows where either is null
//! 2. Encode labels (fail fast on anything outside spam/ham)
//! 3. Normalize each message (per-row degradation, never per-row failure)
//! 4. Stratified 70/30 split
//! 5. Fit TF-IDF on the training partition only, project both partitions
//!
//! The operation is all-or-nothing: any stage error aborts the run and no
//! partial state is handed downstream.

use polars::prelude::{DataFrame, DataType};
use tracing::{debug, info, warn};
use vispam_model::{LABEL_COLUMN, Label, MessageRecord, TEXT_COLUMN, TransformOptions};

use crate::error::{Result, TransformError};
use crate::split::stratified_split;
use crate::state::{CleanedMessage, TransformationState};
use crate::text::TextNormalizer;
use crate::vectorize::TfidfVectorizer;

/// Transform a labeled dataset into the state consumed by the training
/// stage.
///
/// Expects the canonical `text`/`label` columns (ingestion renames source
/// columns before this point).
pub fn transform_dataset(
    df: &DataFrame,
    options: &TransformOptions,
) -> Result<TransformationState> {
    let records = extract_records(df)?;
    if records.is_empty() {
        return Err(TransformError::EmptyDataset);
    }
    info!(rows = records.len(), "labels encoded");

    let normalizer = TextNormalizer::new(options.normalizer.clone());
    let cleaned: Vec<CleanedMessage> = records
        .iter()
        .map(|record| {
            let normalized = normalizer.normalize(&record.text);
            CleanedMessage {
                text: normalized.text,
                label: record.label,
                fidelity: normalized.fidelity,
            }
        })
        .collect();
    let degraded = cleaned.iter().filter(|m| m.fidelity.is_degraded()).count();
    if degraded > 0 {
        warn!(degraded, "rows fell back to partial normalization");
    }
    info!(rows = cleaned.len(), degraded, "normalization complete");

    let labels: Vec<Label> = cleaned.iter().map(|m| m.label).collect();
    let split = stratified_split(&labels, &options.split)?;
    let gather = |indices: &[usize]| -> (Vec<String>, Vec<Label>) {
        indices
            .iter()
            .map(|&i| (cleaned[i].text.clone(), cleaned[i].label))
            .unzip()
    };
    let (train_texts, train_labels) = gather(&split.train);
    let (test_texts, test_labels) = gather(&split.test);
    info!(
        train = train_texts.len(),
        test = test_texts.len(),
        "dataset split"
    );

    let mut vectorizer = TfidfVectorizer::new(options.vectorizer.clone());
    let train_features = vectorizer.fit_transform(&train_texts)?;
    let test_features = vectorizer.transform(&test_texts)?;
    info!(
        features = train_features.cols(),
        "tf-idf fitted on the training partition"
    );

    Ok(TransformationState {
        cleaned,
        train_texts,
        test_texts,
        train_labels,
        test_labels,
        train_features,
        test_features,
        vectorizer,
    })
}

/// Pull labeled records out of the frame, dropping rows with a missing
/// text or label. Label values outside the closed vocabulary abort.
fn extract_records(df: &DataFrame) -> Result<Vec<MessageRecord>> {
    let text_col = df
        .column(TEXT_COLUMN)
        .map_err(|_| TransformError::MissingColumn {
            column: TEXT_COLUMN.to_string(),
        })?
        .cast(&DataType::String)?;
    let label_col = df
        .column(LABEL_COLUMN)
        .map_err(|_| TransformError::MissingColumn {
            column: LABEL_COLUMN.to_string(),
        })?
        .cast(&DataType::String)?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for (text, label) in text_col.str()?.iter().zip(label_col.str()?.iter()) {
        match (text, label) {
            (Some(text), Some(label)) => {
                let label: Label = label.parse()?;
                records.push(MessageRecord::new(text, label));
            }
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped rows with missing values");
    }
    Ok(records)
}
