use std::cmp::Ordering;

use rayon::prelude::*;

use crate::matching::matrix::{CoverageMatrix, LengthMatrix};

/// Up to K ranked reference indices per query
#[derive(Debug, Clone)]
pub struct CandidateTable {
    k: usize,
    columns: Vec<Vec<usize>>,
}

impl CandidateTable {
    /// Ranked candidates for `query`, best first
    #[must_use]
    pub fn candidates(&self, query: usize) -> &[usize] {
        &self.columns[query]
    }

    #[must_use]
    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    /// Requested K; a column holds fewer entries when there are fewer references
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn n_queries(&self) -> usize {
        self.columns.len()
    }
}

/// Ranking of two references for one query: coverage descending, then length
/// difference ascending, then reference index ascending.
///
/// The index term makes this a total order, so the selection does not depend
/// on sort stability or thread scheduling.
#[must_use]
pub fn compare_candidates(
    coverage: &CoverageMatrix,
    lengths: &LengthMatrix,
    query: usize,
    a: usize,
    b: usize,
) -> Ordering {
    coverage
        .get(b, query)
        .total_cmp(&coverage.get(a, query))
        .then_with(|| lengths.get(a, query).cmp(&lengths.get(b, query)))
        .then_with(|| a.cmp(&b))
}

/// Keep the `k` best-ranked references for every query.
#[must_use]
pub fn select_top_k(coverage: &CoverageMatrix, lengths: &LengthMatrix, k: usize) -> CandidateTable {
    let n_references = coverage.n_references();
    let keep = k.min(n_references);

    let columns = (0..coverage.n_queries())
        .into_par_iter()
        .map(|query| {
            if keep == 0 {
                return Vec::new();
            }
            let mut indices: Vec<usize> = (0..n_references).collect();
            let cmp = |a: &usize, b: &usize| compare_candidates(coverage, lengths, query, *a, *b);

            if keep < n_references {
                indices.select_nth_unstable_by(keep - 1, cmp);
                indices.truncate(keep);
            }
            indices.sort_unstable_by(cmp);
            indices
        })
        .collect();

    CandidateTable { k, columns }
}
