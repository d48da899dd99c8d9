//! # fuzzmap
//!
//! A library for reconciling free-text labels against a controlled vocabulary.
//!
//! Metadata exported from sample databases often records organisms as free
//! text: "salmonela enterica", "Homo Sapiens ", "chicken (Gallus gallus)".
//! Exact lookups against a taxonomy fail on typos, casing and ordering.
//!
//! `fuzzmap` solves this by pre-filtering a large reference list with a cheap
//! bigram coverage score, then re-ranking a handful of candidates per query
//! with a fuzzy string scorer.
//!
//! ## Features
//!
//! - **Bounded work**: only the top K references per query reach the fuzzy scorer
//! - **Parallel**: coverage, selection and refinement fan out over all cores
//! - **Deterministic**: every ranking has a total tie-break order
//! - **Pluggable**: bigram or byte-set coverage; partial-ratio, ratio or Jaro-Winkler scoring
//! - **Fail fast**: oversized records and bad settings abort before any matrix is built
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuzzmap::{MatchingConfig, MatchingEngine};
//!
//! let config = MatchingConfig {
//!     top_k: 2,
//!     score_cutoff: 80.0,
//!     ..MatchingConfig::default()
//! };
//! let engine = MatchingEngine::new(config).unwrap();
//!
//! let report = engine
//!     .run(&["salmonela enterica"], &["Salmonella enterica", "Escherichia coli"])
//!     .unwrap();
//!
//! println!("{}% matched", report.match_rate);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Encoded strings, bigrams and corpora
//! - [`matching`]: Coverage matrices, top-K selection, scorers and the engine
//! - [`parsing`]: Record list readers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod error;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::corpus::Corpus;
pub use crate::core::encoded::EncodedString;
pub use crate::core::types::*;
pub use crate::error::{CorpusKind, MatchError};
pub use crate::matching::engine::{MatchingConfig, MatchingEngine};
pub use crate::matching::report::{MatchReport, MatchResult};
pub use crate::matching::scorer::Scorer;
