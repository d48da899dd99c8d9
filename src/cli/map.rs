use std::io::Write;
use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::cli::{OutputFormat, PipelineArgs};
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::matching::report::MatchReport;

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Execute map subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be read,
/// a record overflows the buffer, the scorer fails, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MapArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let engine = MatchingEngine::new(args.pipeline.config())?;

    let (queries, references) = args.pipeline.read_inputs()?;
    info!(
        "Loaded {} queries and {} references",
        queries.len(),
        references.len()
    );

    let report = engine.run(&queries, &references)?;

    info!("Writing output...");
    let mut out = args.pipeline.writer()?;
    match format {
        OutputFormat::Tsv => write_tsv(&mut out, &report)?,
        OutputFormat::Json => write_json(&mut out, &report, engine.config())?,
        OutputFormat::Text => write_text(&mut out, &report, verbose)?,
    }
    out.flush()?;

    let minutes = start.elapsed().as_secs_f64() / 60.0;
    info!("DONE! Took: {minutes:.2} minutes");
    Ok(())
}

fn write_tsv(out: &mut dyn Write, report: &MatchReport) -> std::io::Result<()> {
    writeln!(out, "query\tmatch")?;
    for (query, matched) in report.pairs() {
        writeln!(out, "{query}\t{matched}")?;
    }
    Ok(())
}

fn write_json(
    out: &mut dyn Write,
    report: &MatchReport,
    config: &MatchingConfig,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "config": config,
        "total": report.total,
        "matched": report.matched,
        "unmatched": report.unmatched(),
        "match_rate": report.match_rate,
        "results": report.entries,
    });
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

fn write_text(out: &mut dyn Write, report: &MatchReport, verbose: bool) -> std::io::Result<()> {
    writeln!(
        out,
        "Matched {} of {} queries ({}%)\n",
        report.matched, report.total, report.match_rate
    )?;

    let width = report
        .entries
        .iter()
        .map(|e| e.query.chars().count())
        .max()
        .unwrap_or(0)
        .max("QUERY".len());

    writeln!(out, "{:<width$}  {:>6}  MATCH", "QUERY", "SCORE")?;
    for entry in &report.entries {
        if !verbose && entry.matched.is_none() {
            continue;
        }
        let score = entry
            .score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
        writeln!(
            out,
            "{:<width$}  {score:>6}  {}",
            entry.query,
            entry.match_label()
        )?;
    }

    if !verbose && report.unmatched() > 0 {
        writeln!(
            out,
            "\n{} unmatched queries hidden (use --verbose to show)",
            report.unmatched()
        )?;
    }
    Ok(())
}
