//! String scorers used to re-rank pre-filtered candidates.
//!
//! All scorers compare case-insensitively and return a score in `0..=100`.
//! A score at or below the caller's cutoff is reported as exactly `0.0`.

use strsim::jaro_winkler;

use crate::core::types::ScorerKind;
use crate::matching::indel::{indel_ratio, ratio_from_lcs, required_lcs, Pattern};

/// Returned by a scorer that cannot compare a pair
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ScorerError(pub String);

/// A failed batch: which candidate was rejected and why
#[derive(Debug, Clone, thiserror::Error)]
#[error("candidate {index}: {source}")]
pub struct BatchFailure {
    /// Position of the rejected reference in the batch
    pub index: usize,
    #[source]
    pub source: ScorerError,
}

/// The expensive pairwise similarity used after candidate selection.
///
/// Implementations must be pure: the same inputs always give the same score.
pub trait Scorer: Send + Sync {
    /// Score `query` against `reference`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScorerError`] if the pair cannot be scored; the run is aborted.
    fn score(&self, reference: &str, query: &str, cutoff: f64) -> Result<f64, ScorerError>;

    /// Score one query against a batch of candidate references, in order.
    ///
    /// `_workers` is the parallelism available to the caller. Scorers with
    /// their own concurrency may use it to size their work; the default scores
    /// the batch sequentially.
    ///
    /// # Errors
    ///
    /// Returns a [`BatchFailure`] naming the first reference the scorer rejected.
    fn score_batch(
        &self,
        references: &[&str],
        query: &str,
        cutoff: f64,
        _workers: usize,
    ) -> Result<Vec<f64>, BatchFailure> {
        references
            .iter()
            .enumerate()
            .map(|(index, reference)| {
                self.score(reference, query, cutoff)
                    .map_err(|source| BatchFailure { index, source })
            })
            .collect()
    }
}

/// Build the scorer selected in configuration
#[must_use]
pub fn scorer_for(kind: ScorerKind) -> Box<dyn Scorer> {
    match kind {
        ScorerKind::PartialRatio => Box::new(PartialRatio),
        ScorerKind::Ratio => Box::new(Ratio),
        ScorerKind::JaroWinkler => Box::new(JaroWinkler),
    }
}

fn apply_cutoff(score: f64, cutoff: f64) -> f64 {
    if score > cutoff {
        score
    } else {
        0.0
    }
}

fn lowercase_chars(s: &str) -> Vec<char> {
    s.to_lowercase().chars().collect()
}

/// Best indel ratio of `shorter` against any window of `longer`.
///
/// Windows are every full-width slice of `longer` plus the partial overhangs
/// at either end, so a short query aligned at the edge still scores. Only
/// scores above `floor` are computed exactly; windows that cannot beat it are
/// abandoned early, so the result is exact whenever it exceeds `floor`.
fn partial_ratio_short_long(shorter: &[char], longer: &[char], floor: f64) -> f64 {
    let s_len = shorter.len();
    let l_len = longer.len();
    if s_len == 0 {
        return if l_len == 0 { 100.0 } else { 0.0 };
    }
    if l_len == 0 {
        return 0.0;
    }
    if s_len <= l_len && longer.windows(s_len).any(|window| window == shorter) {
        return 100.0;
    }

    let pattern = Pattern::new(shorter);
    let mut best = 0.0f64;
    let mut consider = |window: &[char]| {
        let lensum = pattern.len() + window.len();
        let required = required_lcs(best.max(floor), lensum);
        let score = ratio_from_lcs(pattern.lcs(window, required), lensum);
        if score > best {
            best = score;
        }
        best >= 100.0
    };

    // prefix overhangs
    for end in 1..s_len.min(l_len) {
        if consider(&longer[..end]) {
            return 100.0;
        }
    }

    // full-width windows
    for start in 0..=l_len.saturating_sub(s_len) {
        let end = (start + s_len).min(l_len);
        if consider(&longer[start..end]) {
            return 100.0;
        }
    }

    // suffix overhangs
    let suffix_from = if l_len >= s_len { l_len - s_len + 1 } else { 1 };
    for start in suffix_from..l_len {
        if consider(&longer[start..]) {
            return 100.0;
        }
    }

    best
}

/// Best partial alignment of the shorter string inside the longer one
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl PartialRatio {
    #[must_use]
    pub fn similarity(a: &str, b: &str) -> f64 {
        Self::similarity_above(a, b, 0.0)
    }

    /// Like [`similarity`](Self::similarity), exact only when the result
    /// exceeds `floor`; lower alignments may be reported as smaller values.
    #[must_use]
    pub fn similarity_above(a: &str, b: &str, floor: f64) -> f64 {
        let a = lowercase_chars(a);
        let b = lowercase_chars(b);
        match a.len().cmp(&b.len()) {
            std::cmp::Ordering::Less => partial_ratio_short_long(&a, &b, floor),
            std::cmp::Ordering::Greater => partial_ratio_short_long(&b, &a, floor),
            std::cmp::Ordering::Equal => {
                let forward = partial_ratio_short_long(&a, &b, floor);
                if forward >= 100.0 {
                    forward
                } else {
                    forward.max(partial_ratio_short_long(&b, &a, floor.max(forward)))
                }
            }
        }
    }
}

impl Scorer for PartialRatio {
    fn score(&self, reference: &str, query: &str, cutoff: f64) -> Result<f64, ScorerError> {
        Ok(apply_cutoff(Self::similarity_above(reference, query, cutoff), cutoff))
    }
}

/// Indel similarity of the complete strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratio;

impl Scorer for Ratio {
    fn score(&self, reference: &str, query: &str, cutoff: f64) -> Result<f64, ScorerError> {
        let score = indel_ratio(&lowercase_chars(reference), &lowercase_chars(query));
        Ok(apply_cutoff(score, cutoff))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Scorer for JaroWinkler {
    fn score(&self, reference: &str, query: &str, cutoff: f64) -> Result<f64, ScorerError> {
        let score = jaro_winkler(&reference.to_lowercase(), &query.to_lowercase()) * 100.0;
        Ok(apply_cutoff(score, cutoff))
    }
}
