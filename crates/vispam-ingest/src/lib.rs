//! Dataset ingestion for the Vietnamese SMS spam pipeline.
//!
//! Reads a labeled message CSV into a Polars DataFrame with the canonical
//! `text`/`label` columns and reports missing-value counts. Dropping those
//! rows is the transform stage's first action, not ingestion's.

pub mod csv_ingest;
pub mod error;

pub use csv_ingest::{DatasetSummary, IngestOptions, read_dataset};
pub use error::{IngestError, Result};
