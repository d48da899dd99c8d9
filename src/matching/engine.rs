use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::corpus::Corpus;
use crate::core::types::{MetricKind, ScorerKind};
use crate::error::{CorpusKind, MatchError, Result};
use crate::matching::matrix::{CoverageMatrix, LengthMatrix};
use crate::matching::metric::{BigramMetric, ByteSetMetric};
use crate::matching::refine::refine;
use crate::matching::report::MatchReport;
use crate::matching::scorer::{scorer_for, Scorer};
use crate::matching::topk::{select_top_k, CandidateTable};
use crate::utils::validation::{
    validate_capacity, validate_score_cutoff, validate_threads, validate_top_k,
};

/// Default number of candidates kept per query
pub const DEFAULT_TOP_K: usize = 10;

/// Default minimum scorer score for a match
pub const DEFAULT_SCORE_CUTOFF: f64 = 90.0;

/// Default encoding buffer capacity in bytes
pub const DEFAULT_CAPACITY: usize = 500;

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Candidates kept per query after the coverage pre-filter
    pub top_k: usize,
    /// Scores at or below this value do not count as a match
    pub score_cutoff: f64,
    /// Fixed buffer size every record is encoded into
    pub capacity: usize,
    pub metric: MetricKind,
    pub scorer: ScorerKind,
    /// Worker threads; `None` uses all available cores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            capacity: DEFAULT_CAPACITY,
            metric: MetricKind::default(),
            scorer: ScorerKind::default(),
            threads: None,
        }
    }
}

impl MatchingConfig {
    /// # Errors
    ///
    /// Returns `MatchError::InvalidConfiguration` naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        validate_top_k(self.top_k)?;
        validate_score_cutoff(self.score_cutoff)?;
        validate_capacity(self.capacity)?;
        validate_threads(self.threads)?;
        Ok(())
    }
}

/// Output of the pre-filter stages, before any scorer call
#[derive(Debug, Clone)]
pub struct CandidateRun {
    pub queries: Corpus,
    pub references: Corpus,
    pub coverage: CoverageMatrix,
    pub lengths: LengthMatrix,
    pub table: CandidateTable,
}

/// Two-stage matcher: coverage pre-filter, then scorer refinement
#[derive(Debug)]
pub struct MatchingEngine {
    config: MatchingConfig,
    /// Dedicated workers when `threads` is set, otherwise the global pool is used
    pool: Option<rayon::ThreadPool>,
}

impl MatchingEngine {
    /// Create an engine, rejecting invalid configuration up front.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidConfiguration` if the configuration is invalid,
    /// or `MatchError::ThreadPool` if the requested workers cannot be started.
    pub fn new(config: MatchingConfig) -> Result<Self> {
        config.validate()?;
        let pool = config
            .threads
            .map(|threads| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| MatchError::ThreadPool(e.to_string()))
            })
            .transpose()?;
        Ok(Self { config, pool })
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Match every query against the references with the configured scorer.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::EmptyCorpus` or `MatchError::BufferOverflow` before
    /// any matrix is built, or `MatchError::ScorerFailure` from refinement.
    pub fn run<S: AsRef<str> + Sync>(&self, queries: &[S], references: &[S]) -> Result<MatchReport> {
        let scorer = scorer_for(self.config.scorer);
        self.run_with_scorer(queries, references, scorer.as_ref())
    }

    /// Like [`run`](Self::run) with a caller-supplied scorer.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with_scorer<S: AsRef<str> + Sync>(
        &self,
        queries: &[S],
        references: &[S],
        scorer: &dyn Scorer,
    ) -> Result<MatchReport> {
        let start = Instant::now();
        let candidates = self.candidates(queries, references)?;

        info!("Running {} refinement...", self.config.scorer);
        let results = self.in_pool(|| {
            refine(
                &candidates.table,
                &candidates.queries,
                &candidates.references,
                &candidates.lengths,
                scorer,
                self.config.score_cutoff,
            )
        })?;

        let report = MatchReport::new(&results, &candidates.queries, &candidates.references);
        info!(
            "Map ratio: {}% ({} / {})",
            report.match_rate, report.matched, report.total
        );
        info!("Matching took {:.2}s", start.elapsed().as_secs_f64());
        Ok(report)
    }

    /// Run only the pre-filter: encode, build both matrices, select top K.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::EmptyCorpus` or `MatchError::BufferOverflow` before
    /// any matrix is built.
    pub fn candidates<S: AsRef<str> + Sync>(
        &self,
        queries: &[S],
        references: &[S],
    ) -> Result<CandidateRun> {
        if queries.is_empty() {
            return Err(MatchError::EmptyCorpus(CorpusKind::Queries));
        }
        if references.is_empty() {
            return Err(MatchError::EmptyCorpus(CorpusKind::References));
        }

        info!("Encoding {} queries...", queries.len());
        let queries = Corpus::encode(CorpusKind::Queries, queries, self.config.capacity)?;
        info!("Encoding {} references...", references.len());
        let references = Corpus::encode(CorpusKind::References, references, self.config.capacity)?;

        Ok(self.in_pool(|| {
            info!(
                "Building {} coverage matrix ({} x {})...",
                self.config.metric,
                references.len(),
                queries.len()
            );
            let coverage = match self.config.metric {
                MetricKind::Bigram => CoverageMatrix::build(&BigramMetric, &queries, &references),
                MetricKind::ByteSet => CoverageMatrix::build(&ByteSetMetric, &queries, &references),
            };

            info!("Building length matrix...");
            let lengths = LengthMatrix::build(&queries.lengths(), &references.lengths());

            info!("Selecting top {} candidates per query...", self.config.top_k);
            let table = select_top_k(&coverage, &lengths, self.config.top_k);

            CandidateRun {
                queries,
                references,
                coverage,
                lengths,
                table,
            }
        }))
    }

    /// Run `f` on the dedicated pool when a thread count is configured
    fn in_pool<T, F>(&self, f: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}
