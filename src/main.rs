use clap::Parser;
use tracing_subscriber::EnvFilter;

use fuzzmap::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins; otherwise the verbosity flag picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("fuzzmap=debug,info")
        } else {
            EnvFilter::new("fuzzmap=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Map(args) => {
            cli::map::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Candidates(args) => {
            cli::candidates::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
