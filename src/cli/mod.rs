//! Command-line interface for fuzzmap.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **map**: Find the best reference for every query and write `query\tmatch` rows
//! - **candidates**: Run only the coverage pre-filter and show the top K references per query
//!
//! ## Usage
//!
//! ```text
//! # Map host names onto taxonomic names
//! fuzzmap map -q hosts.txt -r taxo_names.txt -o hosts_mapped.tsv
//!
//! # Keep 100 candidates per query and accept scores above 85
//! fuzzmap map -q hosts.txt -r taxo_names.txt -n 100 -s 85
//!
//! # JSON report with per-query scores
//! fuzzmap --format json map -q hosts.txt -r taxo_names.txt
//!
//! # Inspect the pre-filter
//! fuzzmap candidates -q hosts.txt -r taxo_names.txt -n 5
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::core::types::{MetricKind, ScorerKind};
use crate::matching::engine::{
    MatchingConfig, DEFAULT_CAPACITY, DEFAULT_SCORE_CUTOFF, DEFAULT_TOP_K,
};
use crate::parsing::records::read_records;

pub mod candidates;
pub mod map;

#[derive(Parser)]
#[command(name = "fuzzmap")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Fuzzy-match free-text labels against a reference vocabulary")]
#[command(
    long_about = "fuzzmap reconciles free-text labels (e.g. host names) against a controlled vocabulary (e.g. taxonomic names) when exact matching fails.\n\nIt pre-filters references by bigram coverage, keeps the top K candidates per query, and picks the best candidate with a fuzzy scorer:\n- Typos and dropped characters are tolerated\n- Unmatched queries are reported as NA\n- Ties are broken deterministically"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map every query to its best matching reference
    Map(map::MapArgs),

    /// Show the pre-filtered candidate references for every query
    Candidates(candidates::CandidatesArgs),
}

/// Inputs and pipeline settings shared by all subcommands
#[derive(Args)]
pub struct PipelineArgs {
    /// Query file, one record per line (.gz accepted)
    #[arg(short, long)]
    pub query: PathBuf,

    /// Reference file, one record per line (.gz accepted)
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of candidate references kept per query
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_K)]
    pub top_n: usize,

    /// Minimum fuzzy score (0-100); scores at or below it are not matches
    #[arg(short = 's', long, default_value_t = DEFAULT_SCORE_CUTOFF)]
    pub score_cutoff: f64,

    /// Encoding buffer size in bytes; every record must fit
    #[arg(short = 'b', long, default_value_t = DEFAULT_CAPACITY)]
    pub buffer_size: usize,

    /// Coverage metric used by the pre-filter
    #[arg(long, value_enum, default_value_t = MetricKind::Bigram)]
    pub metric: MetricKind,

    /// Scorer used to pick among candidates
    #[arg(long, value_enum, default_value_t = ScorerKind::PartialRatio)]
    pub scorer: ScorerKind,

    /// Worker threads (defaults to all cores)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

impl PipelineArgs {
    #[must_use]
    pub fn config(&self) -> MatchingConfig {
        MatchingConfig {
            top_k: self.top_n,
            score_cutoff: self.score_cutoff,
            capacity: self.buffer_size,
            metric: self.metric,
            scorer: self.scorer,
            threads: self.threads,
        }
    }

    /// Read both record files
    ///
    /// # Errors
    ///
    /// Returns an error naming the file that could not be read.
    pub fn read_inputs(&self) -> anyhow::Result<(Vec<String>, Vec<String>)> {
        let queries = read_input(&self.query)?;
        let references = read_input(&self.reference)?;
        Ok((queries, references))
    }

    /// Buffered writer for the output file, or stdout
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be created.
    pub fn writer(&self) -> anyhow::Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<String>> {
    tracing::info!("Reading {}...", path.display());
    read_records(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
