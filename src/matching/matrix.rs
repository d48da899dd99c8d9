//! Dense reference x query matrices feeding candidate selection.
//!
//! Both matrices are stored row-major with one row per reference. Builders
//! hand each worker a disjoint row, so no locking is needed.

use rayon::prelude::*;

use crate::core::corpus::Corpus;
use crate::matching::metric::SimilarityMetric;
use crate::utils::progress::Progress;

/// Coverage of every query by every reference, in `[0, 1]`
#[derive(Debug, Clone)]
pub struct CoverageMatrix {
    n_references: usize,
    n_queries: usize,
    values: Vec<f64>,
}

impl CoverageMatrix {
    /// Compute `coverage[r][q]` for every pair, in parallel over references.
    #[must_use]
    pub fn build<M: SimilarityMetric>(metric: &M, queries: &Corpus, references: &Corpus) -> Self {
        let n_queries = queries.len();
        let n_references = references.len();

        let query_units: Vec<M::Units> = queries
            .records()
            .par_iter()
            .map(|q| metric.units(q))
            .collect();

        let progress = Progress::new("coverage matrix", n_references);
        let mut values = vec![0.0; n_references * n_queries];

        if n_queries > 0 {
            values
                .par_chunks_mut(n_queries)
                .zip(references.records().par_iter())
                .for_each(|(row, reference)| {
                    let reference_units = metric.units(reference);
                    for (cell, query) in row.iter_mut().zip(&query_units) {
                        *cell = metric.score(query, &reference_units);
                    }
                    progress.tick();
                });
        }

        Self {
            n_references,
            n_queries,
            values,
        }
    }

    #[must_use]
    pub fn get(&self, reference: usize, query: usize) -> f64 {
        self.values[reference * self.n_queries + query]
    }

    #[must_use]
    pub fn row(&self, reference: usize) -> &[f64] {
        let start = reference * self.n_queries;
        &self.values[start..start + self.n_queries]
    }

    #[must_use]
    pub fn n_references(&self) -> usize {
        self.n_references
    }

    #[must_use]
    pub fn n_queries(&self) -> usize {
        self.n_queries
    }
}

/// Absolute difference of effective lengths for every (reference, query) pair
#[derive(Debug, Clone)]
pub struct LengthMatrix {
    n_references: usize,
    n_queries: usize,
    values: Vec<usize>,
}

impl LengthMatrix {
    #[must_use]
    pub fn build(query_lengths: &[usize], reference_lengths: &[usize]) -> Self {
        let n_queries = query_lengths.len();
        let n_references = reference_lengths.len();
        let mut values = vec![0; n_references * n_queries];

        if n_queries > 0 {
            values
                .par_chunks_mut(n_queries)
                .zip(reference_lengths.par_iter())
                .for_each(|(row, &reference_len)| {
                    for (cell, &query_len) in row.iter_mut().zip(query_lengths) {
                        *cell = query_len.abs_diff(reference_len);
                    }
                });
        }

        Self {
            n_references,
            n_queries,
            values,
        }
    }

    #[must_use]
    pub fn get(&self, reference: usize, query: usize) -> usize {
        self.values[reference * self.n_queries + query]
    }

    #[must_use]
    pub fn n_references(&self) -> usize {
        self.n_references
    }

    #[must_use]
    pub fn n_queries(&self) -> usize {
        self.n_queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusKind;
    use crate::matching::metric::{BigramMetric, ByteSetMetric};

    fn corpora() -> (Corpus, Corpus) {
        let queries = Corpus::encode(
            CorpusKind::Queries,
            &["salmonela enterica", "Escherichia coli", "zebrafish"],
            32,
        )
        .unwrap();
        let references = Corpus::encode(
            CorpusKind::References,
            &["Salmonella enterica", "Escherichia coli"],
            32,
        )
        .unwrap();
        (queries, references)
    }

    #[test]
    fn test_coverage_dimensions_and_bounds() {
        let (queries, references) = corpora();
        for matrix in [
            CoverageMatrix::build(&BigramMetric, &queries, &references),
            CoverageMatrix::build(&ByteSetMetric, &queries, &references),
        ] {
            assert_eq!(matrix.n_references(), 2);
            assert_eq!(matrix.n_queries(), 3);
            for r in 0..2 {
                assert_eq!(matrix.row(r).len(), 3);
                for q in 0..3 {
                    let v = matrix.get(r, q);
                    assert!((0.0..=1.0).contains(&v), "coverage {v} out of range");
                }
            }
        }
    }

    #[test]
    fn test_coverage_self_similarity() {
        let (queries, references) = corpora();
        let matrix = CoverageMatrix::build(&BigramMetric, &queries, &references);
        // "Escherichia coli" is reference 1 and query 1
        assert!((matrix.get(1, 1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_prefers_true_match() {
        let (queries, references) = corpora();
        let matrix = CoverageMatrix::build(&BigramMetric, &queries, &references);
        assert!(matrix.get(0, 0) > matrix.get(1, 0));
    }

    #[test]
    fn test_length_matrix() {
        let (queries, references) = corpora();
        let matrix = LengthMatrix::build(&queries.lengths(), &references.lengths());
        assert_eq!(matrix.n_references(), 2);
        assert_eq!(matrix.n_queries(), 3);
        // 18 vs 19
        assert_eq!(matrix.get(0, 0), 1);
        // identical strings
        assert_eq!(matrix.get(1, 1), 0);
        // 9 vs 16, absolute
        assert_eq!(matrix.get(1, 2), 7);
    }

    #[test]
    fn test_length_matrix_is_symmetric_in_direction() {
        let matrix = LengthMatrix::build(&[3, 10], &[10, 3]);
        assert_eq!(matrix.get(0, 0), 7);
        assert_eq!(matrix.get(1, 1), 7);
        assert_eq!(matrix.get(0, 1), 0);
    }
}
