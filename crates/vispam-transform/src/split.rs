//! Stratified train/test partitioning.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;
use vispam_model::{Label, SplitOptions};

use crate::error::{Result, TransformError};

/// Minimum class size for stratification.
const MIN_CLASS_SIZE: usize = 2;

/// Row indices of the two partitions, each sorted ascending.
///
/// Together they cover `0..n` exactly once: every index lands in exactly
/// one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition row indices into train/test, preserving each class's
/// proportion across partitions.
///
/// Each label class is shuffled with a Fisher-Yates pass seeded from
/// `options.seed`, then `round(class_size * test_fraction)` of it (clamped
/// so both partitions keep at least one member of every class) goes to the
/// test partition. Deterministic for a fixed seed and a fixed input
/// ordering.
///
/// # Errors
///
/// - [`TransformError::InvalidTestFraction`] unless `0 < test_fraction < 1`
/// - [`TransformError::EmptyDataset`] for empty input
/// - [`TransformError::InsufficientData`] if any class has fewer than 2 members
pub fn stratified_split(labels: &[Label], options: &SplitOptions) -> Result<SplitIndices> {
    let fraction = options.test_fraction;
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(TransformError::InvalidTestFraction { fraction });
    }
    if labels.is_empty() {
        return Err(TransformError::EmptyDataset);
    }

    let mut by_class: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
    for (index, label) in labels.iter().enumerate() {
        by_class.entry(*label).or_default().push(index);
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for (label, mut group) in by_class {
        if group.len() < MIN_CLASS_SIZE {
            return Err(TransformError::InsufficientData {
                label,
                count: group.len(),
                required: MIN_CLASS_SIZE,
            });
        }
        group.shuffle(&mut rng);
        let n_test = ((group.len() as f64) * fraction).round() as usize;
        let n_test = n_test.clamp(1, group.len() - 1);
        test.extend_from_slice(&group[..n_test]);
        train.extend_from_slice(&group[n_test..]);
    }

    // Sorted indices keep downstream row order reproducible regardless of
    // shuffle order.
    train.sort_unstable();
    test.sort_unstable();

    debug!(
        train = train.len(),
        test = test.len(),
        seed = options.seed,
        "stratified split complete"
    );

    Ok(SplitIndices { train, test })
}
