use serde::Serialize;

use crate::core::corpus::Corpus;
use crate::matching::metric::count_to_f64;

/// Label written for queries without a match
pub const UNMATCHED_LABEL: &str = "NA";

/// Final outcome for one query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    /// Index into the reference corpus and the scorer's score
    Matched { reference: usize, score: f64 },
    Unmatched,
}

impl MatchResult {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    #[must_use]
    pub fn reference(&self) -> Option<usize> {
        match self {
            Self::Matched { reference, .. } => Some(*reference),
            Self::Unmatched => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Matched { score, .. } => Some(*score),
            Self::Unmatched => None,
        }
    }
}

/// One query with its resolved match
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub query: String,
    #[serde(rename = "match")]
    pub matched: Option<String>,
    pub reference_index: Option<usize>,
    pub score: Option<f64>,
}

impl ReportEntry {
    /// The matched reference text, or [`UNMATCHED_LABEL`]
    #[must_use]
    pub fn match_label(&self) -> &str {
        self.matched.as_deref().unwrap_or(UNMATCHED_LABEL)
    }
}

/// Per-query results in input order plus the aggregate match rate
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub total: usize,
    pub matched: usize,
    /// Percentage of matched queries, rounded to two decimals
    pub match_rate: f64,
    pub entries: Vec<ReportEntry>,
}

impl MatchReport {
    /// Resolve reference indices to text and aggregate counts.
    ///
    /// # Panics
    ///
    /// Panics if `results` and `queries` differ in length or a result names a
    /// reference outside `references`.
    #[must_use]
    pub fn new(results: &[MatchResult], queries: &Corpus, references: &Corpus) -> Self {
        assert_eq!(results.len(), queries.len(), "one result per query");

        let entries: Vec<ReportEntry> = results
            .iter()
            .enumerate()
            .map(|(i, result)| ReportEntry {
                query: queries.text(i).into_owned(),
                matched: result.reference().map(|r| references.text(r).into_owned()),
                reference_index: result.reference(),
                score: result.score(),
            })
            .collect();

        let total = entries.len();
        let matched = results.iter().filter(|r| r.is_matched()).count();

        Self {
            total,
            matched,
            match_rate: match_rate(matched, total),
            entries,
        }
    }

    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }

    /// `(query, match-or-NA)` pairs in input order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.query.as_str(), e.match_label()))
    }
}

/// `matched / total` as a percentage rounded to two decimals; 0 for no queries
#[must_use]
pub fn match_rate(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count_to_f64(matched) / count_to_f64(total) * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusKind;

    #[test]
    fn test_match_rate_rounding() {
        assert!((match_rate(1, 3) - 33.33).abs() < 1e-9);
        assert!((match_rate(2, 3) - 66.67).abs() < 1e-9);
        assert!((match_rate(3, 3) - 100.0).abs() < 1e-9);
        assert!(match_rate(0, 7).abs() < 1e-9);
        assert!(match_rate(0, 0).abs() < 1e-9);
        assert!((match_rate(1, 8) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_report_entries() {
        let queries =
            Corpus::encode(CorpusKind::Queries, &["homo sapien", "zebrafish", "mus"], 16).unwrap();
        let references =
            Corpus::encode(CorpusKind::References, &["Mus musculus", "Homo sapiens"], 16).unwrap();
        let results = [
            MatchResult::Matched {
                reference: 1,
                score: 95.0,
            },
            MatchResult::Unmatched,
            MatchResult::Matched {
                reference: 0,
                score: 100.0,
            },
        ];

        let report = MatchReport::new(&results, &queries, &references);
        assert_eq!(report.total, 3);
        assert_eq!(report.matched, 2);
        assert_eq!(report.unmatched(), 1);
        assert!((report.match_rate - 66.67).abs() < 1e-9);

        let pairs: Vec<_> = report.pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("homo sapien", "Homo sapiens"),
                ("zebrafish", "NA"),
                ("mus", "Mus musculus"),
            ]
        );
        assert_eq!(report.entries[2].reference_index, Some(0));
        assert_eq!(report.entries[1].score, None);
    }

    #[test]
    fn test_match_result_json_shape() {
        let json = serde_json::to_value(MatchResult::Matched {
            reference: 3,
            score: 91.5,
        })
        .unwrap();
        assert_eq!(json["status"], "matched");
        assert_eq!(json["reference"], 3);
        assert_eq!(
            serde_json::to_value(MatchResult::Unmatched).unwrap()["status"],
            "unmatched"
        );
    }
}
