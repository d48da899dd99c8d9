//! Centralized validation and limit checks.

use crate::error::MatchError;

/// Maximum number of records accepted from a single input file (DOS protection)
pub const MAX_RECORDS: usize = 10_000_000;

/// Upper bound of the scorer's score range
pub const MAX_SCORE: f64 = 100.0;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
///
/// # Errors
///
/// Returns `MatchError::TooManyRecords` with the count the new record would
/// reach if that exceeds `MAX_RECORDS`.
pub fn check_record_limit(count: usize) -> Result<(), MatchError> {
    if count >= MAX_RECORDS {
        return Err(MatchError::TooManyRecords(count + 1));
    }
    Ok(())
}

/// # Errors
///
/// Returns `MatchError::InvalidConfiguration` if `top_k` is zero.
pub fn validate_top_k(top_k: usize) -> Result<(), MatchError> {
    if top_k == 0 {
        return Err(MatchError::InvalidConfiguration(
            "number of candidates (top K) must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// A cutoff must be a finite score within `0..=MAX_SCORE`.
///
/// # Errors
///
/// Returns `MatchError::InvalidConfiguration` for NaN, infinite, negative or
/// out-of-range cutoffs.
pub fn validate_score_cutoff(cutoff: f64) -> Result<(), MatchError> {
    if !cutoff.is_finite() {
        return Err(MatchError::InvalidConfiguration(format!(
            "score cutoff must be a finite number, got {cutoff}"
        )));
    }
    if !(0.0..=MAX_SCORE).contains(&cutoff) {
        return Err(MatchError::InvalidConfiguration(format!(
            "score cutoff must be between 0 and {MAX_SCORE}, got {cutoff}"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns `MatchError::InvalidConfiguration` if `capacity` is zero.
pub fn validate_capacity(capacity: usize) -> Result<(), MatchError> {
    if capacity == 0 {
        return Err(MatchError::InvalidConfiguration(
            "buffer capacity must be at least 1 byte".to_string(),
        ));
    }
    Ok(())
}

/// # Errors
///
/// Returns `MatchError::InvalidConfiguration` for an explicit thread count of zero.
pub fn validate_threads(threads: Option<usize>) -> Result<(), MatchError> {
    if threads == Some(0) {
        return Err(MatchError::InvalidConfiguration(
            "thread count must be at least 1".to_string(),
        ));
    }
    Ok(())
}
