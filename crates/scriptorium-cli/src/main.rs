//! Scriptorium CLI - normalize machine-drafted scripture translations.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Normalize {
            file,
            reference,
            baseline,
            approvals,
            config,
            output,
            review,
            stats,
        } => commands::normalize::run(
            commands::normalize::NormalizeArgs {
                file,
                reference,
                baseline,
                approvals,
                config,
                output,
                review,
                stats,
            },
            cli.verbose,
        ),

        Commands::Suggest {
            file,
            output,
            config,
            min_confidence,
        } => commands::suggest::run(file, output, config, min_confidence, cli.verbose),

        Commands::Apply {
            file,
            approvals,
            output,
        } => commands::apply::run(file, approvals, output, cli.verbose),

        Commands::Classify { file, json } => commands::classify::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
