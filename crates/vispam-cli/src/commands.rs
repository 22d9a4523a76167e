//! Transform command orchestration.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use vispam_ingest::{IngestOptions, read_dataset};
use vispam_model::{SplitOptions, TransformOptions, VectorizerOptions};
use vispam_transform::{TransformationState, transform_dataset};

use crate::artifacts::write_run_artifacts;
use crate::cli::TransformArgs;

/// What a transform run produced, for the end-of-run summary.
pub struct TransformSummary {
    pub rows: usize,
    pub dropped: usize,
    pub degraded: usize,
    pub train: usize,
    pub test: usize,
    pub features: usize,
    pub artifacts_dir: Option<PathBuf>,
}

pub fn run_transform(args: &TransformArgs) -> Result<TransformSummary> {
    let started = Instant::now();
    let options = transform_options(args);

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let ingest_options = IngestOptions::new()
        .with_text_column(&args.text_column)
        .with_label_column(&args.label_column);
    let ingest_span = info_span!("ingest", dataset = %args.dataset.display());
    let (df, summary) = ingest_span
        .in_scope(|| read_dataset(&args.dataset, &ingest_options))
        .with_context(|| format!("load dataset {}", args.dataset.display()))?;

    // =========================================================================
    // Stage 2: Transform
    // =========================================================================
    let transform_span = info_span!("transform", rows = summary.rows);
    let state = transform_span.in_scope(|| -> Result<TransformationState> {
        let spinner = progress_spinner("normalizing, splitting, vectorizing");
        let state = transform_dataset(&df, &options).context("transform dataset")?;
        spinner.finish_and_clear();
        Ok(state)
    })?;

    // =========================================================================
    // Stage 3: Persist artifacts
    // =========================================================================
    let artifacts_dir = if args.dry_run {
        info!("dry run: skipping artifact persistence");
        None
    } else {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| {
            args.dataset
                .parent()
                .map(|p| p.join("artifacts"))
                .unwrap_or_else(|| PathBuf::from("artifacts"))
        });
        let persist_span = info_span!("persist", dir = %output_dir.display());
        let artifacts =
            persist_span.in_scope(|| write_run_artifacts(&output_dir, &state))?;
        Some(artifacts.dir)
    };

    info!(elapsed = ?started.elapsed(), "transform run complete");

    Ok(TransformSummary {
        rows: summary.rows,
        dropped: summary.rows - state.cleaned.len(),
        degraded: state.degraded_rows(),
        train: state.train_texts.len(),
        test: state.test_texts.len(),
        features: state.train_features.cols(),
        artifacts_dir,
    })
}

pub fn print_summary(summary: &TransformSummary) {
    println!("Rows          {}", summary.rows);
    println!("Dropped       {}", summary.dropped);
    println!("Degraded      {}", summary.degraded);
    println!("Train / Test  {} / {}", summary.train, summary.test);
    println!("Features      {}", summary.features);
    match &summary.artifacts_dir {
        Some(dir) => println!("Artifacts     {}", dir.display()),
        None => println!("Artifacts     (dry run)"),
    }
}

fn transform_options(args: &TransformArgs) -> TransformOptions {
    let max_features = match args.max_features {
        0 => None,
        cap => Some(cap),
    };
    TransformOptions::new()
        .with_split(
            SplitOptions::new()
                .with_test_fraction(args.test_fraction)
                .with_seed(args.seed),
        )
        .with_vectorizer(
            VectorizerOptions::new()
                .with_ngram_range(args.ngram_min, args.ngram_max)
                .with_min_document_frequency(args.min_df)
                .with_max_features(max_features),
        )
}

fn progress_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> TransformArgs {
        TransformArgs {
            dataset: PathBuf::from("messages.csv"),
            output_dir: None,
            text_column: "text".to_string(),
            label_column: "label".to_string(),
            test_fraction: 0.3,
            seed: 42,
            ngram_min: 1,
            ngram_max: 2,
            min_df: 2,
            max_features: 5000,
            dry_run: false,
        }
    }

    #[test]
    fn options_mirror_cli_flags() {
        let options = transform_options(&args());
        assert_eq!(options.split.seed, 42);
        assert_eq!(options.vectorizer.ngram_range, (1, 2));
        assert_eq!(options.vectorizer.max_features, Some(5000));
    }

    #[test]
    fn zero_max_features_disables_the_cap() {
        let mut cli_args = args();
        cli_args.max_features = 0;
        let options = transform_options(&cli_args);
        assert_eq!(options.vectorizer.max_features, None);
    }
}
