//! Core data types for encoded string corpora.
//!
//! - [`EncodedString`](encoded::EncodedString): a string held in a fixed-capacity, zero-padded byte buffer
//! - [`Corpus`](corpus::Corpus): an ordered set of encoded queries or references
//! - [`bigrams`](bigram::bigrams): overlapping byte pairs of an encoded string
//! - [`MetricKind`](types::MetricKind), [`ScorerKind`](types::ScorerKind): pipeline strategy selectors
//!
//! ## Encoding
//!
//! Every record in a run is encoded at the same capacity. Padding bytes are
//! zero, so the effective length of a record is the count of bytes before the
//! first zero:
//!
//! | Text | Capacity | Buffer | Effective length |
//! |------|----------|--------|------------------|
//! | `"abc"` | 6 | `61 62 63 00 00 00` | 3 |
//! | `""` | 4 | `00 00 00 00` | 0 |

pub mod bigram;
pub mod corpus;
pub mod encoded;
pub mod types;
