//! Transformation core for the Vietnamese SMS spam pipeline.
//!
//! This crate turns a labeled message dataset into the numeric state the
//! training stage consumes:
//!
//! - **text**: normalization (lowercase, diacritic stripping, punctuation
//!   and digit removal)
//! - **segment**: dictionary-based Vietnamese compound joining
//! - **split**: seeded stratified train/test partitioning
//! - **vectorize**: TF-IDF features fitted on the training partition only
//! - **pipeline**: the all-or-nothing `transform_dataset` orchestration
//! - **state**: the `TransformationState` handoff artifact

pub mod error;
pub mod pipeline;
pub mod segment;
pub mod split;
pub mod state;
pub mod text;
pub mod vectorize;

pub use error::{Result, TransformError};
pub use pipeline::transform_dataset;
pub use segment::Segmenter;
pub use split::{SplitIndices, stratified_split};
pub use state::{CleanedMessage, TransformationState};
pub use text::{Fidelity, NormalizedText, TextNormalizer};
pub use vectorize::{FittedVocabulary, TfidfVectorizer};
