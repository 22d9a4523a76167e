//! Labeled message CSV loading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};
use vispam_model::{LABEL_COLUMN, TEXT_COLUMN};

use crate::error::{IngestError, Result};

/// Ingestion options: which source columns hold the message text and the
/// label. Defaults match the canonical column names.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub text_column: String,
    pub label_column: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            text_column: TEXT_COLUMN.to_string(),
            label_column: LABEL_COLUMN.to_string(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the source column holding the message text.
    #[must_use]
    pub fn with_text_column(mut self, name: impl Into<String>) -> Self {
        self.text_column = name.into();
        self
    }

    /// Name of the source column holding the label.
    #[must_use]
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }
}

/// Per-column null counts, reported so a run's log shows how many rows the
/// transform stage is about to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub null_texts: usize,
    pub null_labels: usize,
}

/// Read a labeled message dataset into a DataFrame with the canonical
/// `text`/`label` columns.
///
/// Source columns are selected by name per `options` and renamed to the
/// canonical names, so every later stage is independent of the source
/// schema. Rows with missing values are NOT dropped here; that is the
/// transform stage's first action.
pub fn read_dataset(path: &Path, options: &IngestOptions) -> Result<(DataFrame, DatasetSummary)> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut selected = select_columns(&df, options, path)?;
    rename_to_canonical(&mut selected, options)?;

    let summary = DatasetSummary {
        rows: selected.height(),
        null_texts: selected.column(TEXT_COLUMN)?.null_count(),
        null_labels: selected.column(LABEL_COLUMN)?.null_count(),
    };
    if summary.null_texts > 0 || summary.null_labels > 0 {
        debug!(
            null_texts = summary.null_texts,
            null_labels = summary.null_labels,
            "dataset contains missing values"
        );
    }
    info!(
        rows = summary.rows,
        path = %path.display(),
        "dataset loaded"
    );

    Ok((selected, summary))
}

fn select_columns(df: &DataFrame, options: &IngestOptions, path: &Path) -> Result<DataFrame> {
    for column in [&options.text_column, &options.label_column] {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                column: column.clone(),
                path: path.to_path_buf(),
                available: df
                    .get_column_names()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            });
        }
    }
    Ok(df.select([options.text_column.as_str(), options.label_column.as_str()])?)
}

fn rename_to_canonical(df: &mut DataFrame, options: &IngestOptions) -> Result<()> {
    if options.text_column != TEXT_COLUMN {
        df.rename(&options.text_column, TEXT_COLUMN.into())?;
    }
    if options.label_column != LABEL_COLUMN {
        df.rename(&options.label_column, LABEL_COLUMN.into())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn reads_canonical_columns() {
        let file = create_temp_csv("text,label\nxin chao,ham\ntrung thuong,spam\n");
        let (df, summary) = read_dataset(file.path(), &IngestOptions::default()).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.null_texts, 0);
        assert_eq!(column_names(&df), vec![TEXT_COLUMN, LABEL_COLUMN]);
    }

    #[test]
    fn renames_source_columns() {
        let file = create_temp_csv("texts_vi,labels\nxin chao,ham\n");
        let options = IngestOptions::new()
            .with_text_column("texts_vi")
            .with_label_column("labels");
        let (df, _) = read_dataset(file.path(), &options).unwrap();
        assert_eq!(column_names(&df), vec![TEXT_COLUMN, LABEL_COLUMN]);
    }

    #[test]
    fn counts_missing_values() {
        let file = create_temp_csv("text,label\n,ham\ntin tot,\nxin chao,ham\n");
        let (_, summary) = read_dataset(file.path(), &IngestOptions::default()).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.null_texts, 1);
        assert_eq!(summary.null_labels, 1);
    }

    #[test]
    fn missing_column_lists_available_names() {
        let file = create_temp_csv("content,category\nxin chao,ham\n");
        let err = read_dataset(file.path(), &IngestOptions::default()).unwrap_err();
        match err {
            IngestError::MissingColumn {
                column, available, ..
            } => {
                assert_eq!(column, TEXT_COLUMN);
                assert!(available.contains(&"content".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_dataset(
            Path::new("/nonexistent/messages.csv"),
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn header_only_file_is_empty() {
        let file = create_temp_csv("text,label\n");
        let err = read_dataset(file.path(), &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }
}
