//! Candidate generation and ranking.
//!
//! This module provides the matching pipeline:
//!
//! - [`MatchingEngine`](engine::MatchingEngine): main entry point, runs every stage
//! - [`CoverageMatrix`](matrix::CoverageMatrix), [`LengthMatrix`](matrix::LengthMatrix): pairwise pre-filter scores
//! - [`CandidateTable`](topk::CandidateTable): the top K references per query
//! - [`Scorer`](scorer::Scorer): the expensive re-ranking scorer
//! - [`MatchReport`](report::MatchReport): final results and match rate
//!
//! ## Matching Algorithm
//!
//! Scoring every query against every reference with an edit-distance scorer
//! does not scale, so matching runs in two stages:
//!
//! 1. **Coverage**: for every (reference, query) pair, the fraction of query
//!    bigrams (or bytes) found in the reference. Cheap and parallel over references.
//! 2. **Top K**: per query, references ranked by coverage descending, then by
//!    length difference ascending, then by index.
//! 3. **Refinement**: the K candidates are scored with a fuzzy scorer; the best
//!    score above the cutoff wins, ties going to the closest length.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuzzmap::{MatchingConfig, MatchingEngine};
//!
//! let engine = MatchingEngine::new(MatchingConfig::default()).unwrap();
//! let report = engine
//!     .run(&["salmonela enterica"], &["Salmonella enterica", "Escherichia coli"])
//!     .unwrap();
//!
//! for (query, matched) in report.pairs() {
//!     println!("{query}\t{matched}");
//! }
//! ```

pub mod engine;
mod indel;
pub mod matrix;
pub mod metric;
pub mod refine;
pub mod report;
pub mod scorer;
pub mod topk;
