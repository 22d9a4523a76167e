//! CLI argument definitions for the spam transformation pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[command(
    name = "vispam",
    version,
    about = "Vietnamese SMS spam pipeline - dataset transformation",
    long_about = "Transform a labeled Vietnamese SMS dataset into TF-IDF training features.\n\n\
                  Normalizes and word-segments the messages, splits them into stratified\n\
                  train/test partitions, and fits a TF-IDF vocabulary on the training\n\
                  partition only."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a labeled dataset and persist the serving artifacts.
    Transform(TransformArgs),
}

#[derive(Parser)]
pub struct TransformArgs {
    /// Path to the labeled message CSV.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Directory for run artifacts (default: <DATASET dir>/artifacts).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Source column holding the message text.
    #[arg(long = "text-column", default_value = "text")]
    pub text_column: String,

    /// Source column holding the spam/ham label.
    #[arg(long = "label-column", default_value = "label")]
    pub label_column: String,

    /// Fraction of each class held out for evaluation.
    #[arg(long = "test-fraction", default_value_t = 0.3)]
    pub test_fraction: f64,

    /// Seed for the stratified split shuffle.
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Smallest token-group size to index.
    #[arg(long = "ngram-min", default_value_t = 1)]
    pub ngram_min: usize,

    /// Largest token-group size to index.
    #[arg(long = "ngram-max", default_value_t = 2)]
    pub ngram_max: usize,

    /// Drop terms appearing in fewer training documents than this.
    #[arg(long = "min-df", default_value_t = 2)]
    pub min_df: usize,

    /// Vocabulary size cap (0 disables the cap).
    #[arg(long = "max-features", default_value_t = 5000)]
    pub max_features: usize,

    /// Run the transformation and report, without writing artifacts.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
