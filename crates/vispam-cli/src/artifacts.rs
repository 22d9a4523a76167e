//! Persistence of run artifacts for serving-time reuse.
//!
//! Serving must apply the identical fitted vocabulary to new inputs, so a
//! successful run writes the fitted vectorizer plus the processed splits
//! into a timestamped run directory:
//!
//! - `vectorizer.json` — fitted vocabulary, idf weights, and options
//! - `train_features.json` / `test_features.json` — sparse feature matrices
//! - `labels.json` — encoded train/test labels
//! - `cleaned.csv` — the cleaned dataset with per-row fidelity

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use serde::{Deserialize, Serialize};
use sprs::CsMat;
use tracing::info;
use vispam_transform::{Fidelity, TransformationState};

/// Paths of the files a run produced.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub dir: PathBuf,
    pub vectorizer: PathBuf,
    pub train_features: PathBuf,
    pub test_features: PathBuf,
    pub labels: PathBuf,
    pub cleaned: PathBuf,
}

/// JSON-friendly sparse matrix: shape plus (row, col, value) triplets.
#[derive(Debug, Serialize, Deserialize)]
pub struct SparseMatrixArtifact {
    pub rows: usize,
    pub cols: usize,
    pub entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixArtifact {
    fn from_matrix(matrix: &CsMat<f64>) -> Self {
        Self {
            rows: matrix.rows(),
            cols: matrix.cols(),
            entries: matrix
                .iter()
                .map(|(value, (row, col))| (row, col, *value))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LabelsArtifact {
    train: Vec<u8>,
    test: Vec<u8>,
}

/// Write all artifacts of a successful run under a fresh timestamped
/// directory inside `output_dir`.
pub fn write_run_artifacts(
    output_dir: &Path,
    state: &TransformationState,
) -> Result<RunArtifacts> {
    let dir = output_dir.join(format!("run-{}", Local::now().format("%Y%m%d-%H%M%S")));
    fs::create_dir_all(&dir)
        .with_context(|| format!("create artifact directory {}", dir.display()))?;

    let artifacts = RunArtifacts {
        vectorizer: dir.join("vectorizer.json"),
        train_features: dir.join("train_features.json"),
        test_features: dir.join("test_features.json"),
        labels: dir.join("labels.json"),
        cleaned: dir.join("cleaned.csv"),
        dir,
    };

    write_json(&artifacts.vectorizer, &state.vectorizer).context("write vectorizer")?;
    write_json(
        &artifacts.train_features,
        &SparseMatrixArtifact::from_matrix(&state.train_features),
    )
    .context("write train features")?;
    write_json(
        &artifacts.test_features,
        &SparseMatrixArtifact::from_matrix(&state.test_features),
    )
    .context("write test features")?;
    write_json(
        &artifacts.labels,
        &LabelsArtifact {
            train: state.encoded_train_labels(),
            test: state.encoded_test_labels(),
        },
    )
    .context("write labels")?;
    write_cleaned_csv(&artifacts.cleaned, state).context("write cleaned dataset")?;

    info!(dir = %artifacts.dir.display(), "run artifacts written");
    Ok(artifacts)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("serialize {}", path.display()))?;
    Ok(())
}

fn write_cleaned_csv(path: &Path, state: &TransformationState) -> Result<()> {
    let texts: Vec<&str> = state.cleaned.iter().map(|m| m.text.as_str()).collect();
    let labels: Vec<&str> = state.cleaned.iter().map(|m| m.label.as_str()).collect();
    let fidelity: Vec<&str> = state
        .cleaned
        .iter()
        .map(|m| match m.fidelity {
            Fidelity::Full => "full",
            Fidelity::Degraded { .. } => "degraded",
        })
        .collect();

    let mut df = DataFrame::new(vec![
        Column::new("text".into(), texts),
        Column::new("label".into(), labels),
        Column::new("fidelity".into(), fidelity),
    ])?;

    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vispam_model::{LABEL_COLUMN, TEXT_COLUMN, TransformOptions, VectorizerOptions};
    use vispam_transform::transform_dataset;

    fn small_state() -> TransformationState {
        let texts = vec![
            "trung thuong lon",
            "khuyen mai soc",
            "trung thuong nho",
            "nap the mien phi",
            "hop luc chin gio",
            "an com chua em",
            "mai gap nhau nhe",
            "di lam ve muon",
        ];
        let labels = vec!["spam", "spam", "spam", "spam", "ham", "ham", "ham", "ham"];
        let df = DataFrame::new(vec![
            Column::new(TEXT_COLUMN.into(), texts),
            Column::new(LABEL_COLUMN.into(), labels),
        ])
        .unwrap();
        let options = TransformOptions::new()
            .with_vectorizer(VectorizerOptions::new().with_min_document_frequency(1));
        transform_dataset(&df, &options).unwrap()
    }

    #[test]
    fn writes_every_artifact() {
        let state = small_state();
        let out = tempfile::tempdir().unwrap();
        let artifacts = write_run_artifacts(out.path(), &state).unwrap();

        for path in [
            &artifacts.vectorizer,
            &artifacts.train_features,
            &artifacts.test_features,
            &artifacts.labels,
            &artifacts.cleaned,
        ] {
            assert!(path.is_file(), "missing artifact {}", path.display());
        }
    }

    #[test]
    fn feature_artifact_round_trips() {
        let state = small_state();
        let out = tempfile::tempdir().unwrap();
        let artifacts = write_run_artifacts(out.path(), &state).unwrap();

        let json = fs::read_to_string(&artifacts.train_features).unwrap();
        let restored: SparseMatrixArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.rows, state.train_features.rows());
        assert_eq!(restored.cols, state.train_features.cols());
        assert_eq!(restored.entries.len(), state.train_features.nnz());
    }
}
