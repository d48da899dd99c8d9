use rayon::prelude::*;

use crate::core::corpus::Corpus;
use crate::error::{MatchError, Result};
use crate::matching::matrix::LengthMatrix;
use crate::matching::report::MatchResult;
use crate::matching::scorer::Scorer;
use crate::matching::topk::CandidateTable;
use crate::utils::progress::Progress;

/// Re-score each query's candidates and pick its final match.
///
/// The highest-scoring candidate wins. Ties on score go to the candidate whose
/// length is closest to the query's, then to the earlier candidate. A query
/// whose every candidate scores zero is unmatched.
///
/// # Errors
///
/// Returns `MatchError::ScorerFailure` on the first pair the scorer rejects;
/// no partial results are produced.
pub fn refine(
    table: &CandidateTable,
    queries: &Corpus,
    references: &Corpus,
    lengths: &LengthMatrix,
    scorer: &dyn Scorer,
    cutoff: f64,
) -> Result<Vec<MatchResult>> {
    let progress = Progress::new("refinement", table.n_queries());

    (0..table.n_queries())
        .into_par_iter()
        .map(|query| {
            let result = refine_query(query, table, queries, references, lengths, scorer, cutoff);
            progress.tick();
            result
        })
        .collect()
}

fn refine_query(
    query: usize,
    table: &CandidateTable,
    queries: &Corpus,
    references: &Corpus,
    lengths: &LengthMatrix,
    scorer: &dyn Scorer,
    cutoff: f64,
) -> Result<MatchResult> {
    let candidates = table.candidates(query);
    let query_text = queries.text(query);
    let candidate_texts: Vec<_> = candidates.iter().map(|&r| references.text(r)).collect();
    let candidate_refs: Vec<&str> = candidate_texts.iter().map(AsRef::as_ref).collect();

    let scores = scorer
        .score_batch(&candidate_refs, &query_text, cutoff, rayon::current_num_threads())
        .map_err(|failure| MatchError::ScorerFailure {
            query: query_text.to_string(),
            reference: candidate_refs
                .get(failure.index)
                .map_or_else(|| format!("candidate #{}", failure.index), ToString::to_string),
            message: failure.source.to_string(),
        })?;

    Ok(pick_best(candidates, &scores, |reference| {
        lengths.get(reference, query)
    }))
}

/// Choose among scored candidates; `length_diff` looks up the tie-break key.
fn pick_best(
    candidates: &[usize],
    scores: &[f64],
    length_diff: impl Fn(usize) -> usize,
) -> MatchResult {
    let mut best: Option<(usize, f64, usize)> = None;

    for (&reference, &score) in candidates.iter().zip(scores) {
        if score <= 0.0 {
            continue;
        }
        let diff = length_diff(reference);
        let better = match best {
            None => true,
            Some((_, best_score, best_diff)) => {
                score > best_score || (score == best_score && diff < best_diff)
            }
        };
        if better {
            best = Some((reference, score, diff));
        }
    }

    match best {
        Some((reference, score, _)) => MatchResult::Matched { reference, score },
        None => MatchResult::Unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusKind;
    use crate::matching::matrix::CoverageMatrix;
    use crate::matching::metric::BigramMetric;
    use crate::matching::scorer::{PartialRatio, ScorerError};
    use crate::matching::topk::select_top_k;

    struct FailingScorer;

    impl Scorer for FailingScorer {
        fn score(&self, _: &str, _: &str, _: f64) -> std::result::Result<f64, ScorerError> {
            Err(ScorerError("backend unavailable".to_string()))
        }
    }

    /// Rejects one reference and scores the rest with `PartialRatio`
    struct RejectsReference(&'static str);

    impl Scorer for RejectsReference {
        fn score(
            &self,
            reference: &str,
            query: &str,
            cutoff: f64,
        ) -> std::result::Result<f64, ScorerError> {
            if reference == self.0 {
                return Err(ScorerError("bad pair".to_string()));
            }
            PartialRatio.score(reference, query, cutoff)
        }
    }

    fn run(
        queries: &[&str],
        references: &[&str],
        k: usize,
        scorer: &dyn Scorer,
        cutoff: f64,
    ) -> Result<Vec<MatchResult>> {
        let queries = Corpus::encode(CorpusKind::Queries, queries, 64).unwrap();
        let references = Corpus::encode(CorpusKind::References, references, 64).unwrap();
        let coverage = CoverageMatrix::build(&BigramMetric, &queries, &references);
        let lengths = LengthMatrix::build(&queries.lengths(), &references.lengths());
        let table = select_top_k(&coverage, &lengths, k);
        refine(&table, &queries, &references, &lengths, scorer, cutoff)
    }

    #[test]
    fn test_refine_matches_typo() {
        let results = run(
            &["salmonela enterica"],
            &["Salmonella enterica", "Escherichia coli"],
            2,
            &PartialRatio,
            80.0,
        )
        .unwrap();
        match results[0] {
            MatchResult::Matched { reference, score } => {
                assert_eq!(reference, 0);
                assert!(score >= 80.0);
            }
            MatchResult::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn test_refine_unmatched_below_cutoff() {
        let results = run(&["zebrafish"], &["Mus musculus"], 1, &PartialRatio, 90.0).unwrap();
        assert_eq!(results, vec![MatchResult::Unmatched]);
    }

    #[test]
    fn test_refine_scorer_failure_is_fatal() {
        let err = run(&["abc", "def"], &["abc"], 1, &FailingScorer, 50.0).unwrap_err();
        assert!(matches!(err, MatchError::ScorerFailure { .. }));
    }

    #[test]
    fn test_scorer_failure_names_rejected_reference() {
        let err = run(
            &["mus musculus"],
            &["Mus musculus", "Mus spretus", "Danio rerio"],
            3,
            &RejectsReference("Danio rerio"),
            50.0,
        )
        .unwrap_err();
        match err {
            MatchError::ScorerFailure {
                query,
                reference,
                message,
            } => {
                assert_eq!(query, "mus musculus");
                assert_eq!(reference, "Danio rerio");
                assert_eq!(message, "bad pair");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pick_best_prefers_higher_score() {
        let result = pick_best(&[4, 7], &[85.0, 95.0], |_| 0);
        assert_eq!(
            result,
            MatchResult::Matched {
                reference: 7,
                score: 95.0
            }
        );
    }

    #[test]
    fn test_pick_best_tie_goes_to_closest_length() {
        let diffs = |r: usize| if r == 3 { 5 } else { 1 };
        let result = pick_best(&[3, 9], &[100.0, 100.0], diffs);
        assert_eq!(
            result,
            MatchResult::Matched {
                reference: 9,
                score: 100.0
            }
        );
    }

    #[test]
    fn test_pick_best_full_tie_keeps_first_candidate() {
        let result = pick_best(&[2, 1], &[90.0, 90.0], |_| 3);
        assert_eq!(
            result,
            MatchResult::Matched {
                reference: 2,
                score: 90.0
            }
        );
    }

    #[test]
    fn test_pick_best_all_zero_is_unmatched() {
        assert_eq!(pick_best(&[0, 1], &[0.0, 0.0], |_| 0), MatchResult::Unmatched);
        assert_eq!(pick_best(&[], &[], |_| 0), MatchResult::Unmatched);
    }
}
