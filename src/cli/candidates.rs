use std::io::Write;

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::{OutputFormat, PipelineArgs};
use crate::matching::engine::{CandidateRun, MatchingEngine};

#[derive(Args)]
pub struct CandidatesArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// One ranked candidate for a query
#[derive(Debug, Serialize)]
struct CandidateRow {
    rank: usize,
    reference_index: usize,
    reference: String,
    coverage: f64,
    length_diff: usize,
}

#[derive(Debug, Serialize)]
struct QueryCandidates {
    query: String,
    candidates: Vec<CandidateRow>,
}

/// Execute candidates subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be read,
/// a record overflows the buffer, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CandidatesArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let engine = MatchingEngine::new(args.pipeline.config())?;
    let (queries, references) = args.pipeline.read_inputs()?;

    let run = engine.candidates(&queries, &references)?;
    let rows = collect_rows(&run);

    info!("Writing candidate table...");
    let mut out = args.pipeline.writer()?;
    match format {
        OutputFormat::Tsv => write_tsv(&mut out, &rows)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&mut out, &rows)?,
    }
    out.flush()?;
    Ok(())
}

fn collect_rows(run: &CandidateRun) -> Vec<QueryCandidates> {
    (0..run.table.n_queries())
        .map(|q| QueryCandidates {
            query: run.queries.text(q).into_owned(),
            candidates: run
                .table
                .candidates(q)
                .iter()
                .enumerate()
                .map(|(rank, &r)| CandidateRow {
                    rank: rank + 1,
                    reference_index: r,
                    reference: run.references.text(r).into_owned(),
                    coverage: run.coverage.get(r, q),
                    length_diff: run.lengths.get(r, q),
                })
                .collect(),
        })
        .collect()
}

fn write_tsv(out: &mut dyn Write, rows: &[QueryCandidates]) -> std::io::Result<()> {
    writeln!(out, "query\trank\treference\tcoverage\tlength_diff")?;
    for query in rows {
        for c in &query.candidates {
            writeln!(
                out,
                "{}\t{}\t{}\t{:.4}\t{}",
                query.query, c.rank, c.reference, c.coverage, c.length_diff
            )?;
        }
    }
    Ok(())
}

fn write_text(out: &mut dyn Write, rows: &[QueryCandidates]) -> std::io::Result<()> {
    for query in rows {
        writeln!(out, "{}", query.query)?;
        for c in &query.candidates {
            writeln!(
                out,
                "  {:>3}. {} (coverage {:.1}%, length diff {})",
                c.rank,
                c.reference,
                c.coverage * 100.0,
                c.length_diff
            )?;
        }
    }
    Ok(())
}
