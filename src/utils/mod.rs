//! Shared helpers: input limits, configuration checks and stage progress.

pub mod progress;
pub mod validation;
