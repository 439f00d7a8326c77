/*!
 * Command-line interface for ctxdump
 */

use std::io;

use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use ctxdump::config::{Args, Config};
use ctxdump::report::Reporter;

/// Diagnostics go to stderr, filtered by `CTXDUMP_LOG` (default `info`)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CTXDUMP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "ctxdump", &mut io::stdout());
        return Ok(());
    }

    init_tracing();

    let quiet = args.quiet;
    let config = Config::from_args(args);

    let summary = match ctxdump::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    if !quiet {
        Reporter::new().print_report(&summary.into_report(&config));
    }

    Ok(())
}
