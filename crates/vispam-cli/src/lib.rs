//! CLI library components for the spam transformation pipeline.

pub mod logging;
