mod app;
mod calculation;
mod cli;
mod config;
mod display;
mod error;
mod io;
mod pipeline;
mod prelude;

use std::io::IsTerminal;
use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::App;
use calculation::date_range::DateRange;
use cli::Cli;
use display::Display;
use io::azure_client::AzureClient;
use prelude::*;

fn main() -> AppResult<ExitCode> {
    // Credentials usually live in a .env next to the report. Real environment
    // variables still win over it.
    load_dotenv()?;

    let cli = Cli::new();

    let display = Display::new(cli.no_animate);
    setup_logging(&cli, display.is_animated());

    // Setup problems are rendered by miette. Anything after this point is
    // reported by the pipeline itself.
    let mut app = App::try_new(&cli, display)?;
    let client = AzureClient::new(cli.endpoints());
    let range = DateRange::yesterday()?;

    match pipeline::run(&mut app, &client, range) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

// private

fn load_dotenv() -> AppResult {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).into_diagnostic().wrap_err("Could not read the .env file"),
    }
}

/// Logs go to stderr so the spinner on stdout isn't interrupted.
///
/// While the spinner runs, only warnings and errors get through. It already shows
/// the progress. Errors always get through, they are the only failure report.
fn setup_logging(cli: &Cli, animated: bool) {
    let directive = default_directive(cli.quiet, cli.verbose, animated);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn default_directive(quiet: bool, verbose: bool, animated: bool) -> &'static str {
    if quiet {
        "cost_extract=error"
    } else if verbose {
        "cost_extract=debug"
    } else if animated {
        "cost_extract=warn"
    } else {
        "cost_extract=info"
    }
}
