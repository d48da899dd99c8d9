use serde::{Deserialize, Serialize};

/// Which comparison units the coverage pre-filter counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Overlapping byte pairs, matched as a multiset
    #[default]
    Bigram,
    /// Individual bytes, checked for membership in the reference
    ByteSet,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bigram => write!(f, "bigram"),
            Self::ByteSet => write!(f, "byte-set"),
        }
    }
}

/// Which string scorer re-ranks the pre-filtered candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScorerKind {
    /// Best alignment of the shorter string inside the longer one
    #[default]
    PartialRatio,
    /// Normalized indel similarity of the whole strings
    Ratio,
    /// Jaro-Winkler similarity
    JaroWinkler,
}

impl std::fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PartialRatio => write!(f, "partial-ratio"),
            Self::Ratio => write!(f, "ratio"),
            Self::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}
