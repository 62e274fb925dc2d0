/// Clap argument definitions
mod args;

/// Conversion command handler
mod convert;

use clap::Parser;
use clap::error::ErrorKind;

use snscript_core::config::ConvertConfig;

pub use args::Cli;

/// Exit status for usage errors and fatal setup failures
const EXIT_FAILURE: i32 = 1;

/// Main entry point for the CLI
pub fn run_cli() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Missing arguments exit with 1, not clap's default of 2
                let _ = e.print();
                std::process::exit(EXIT_FAILURE);
            }
        },
    };

    init_logging(cli.verbose);

    let config = ConvertConfig::new(cli.source_dir, cli.target_app_dir).with_dry_run(cli.dry_run);

    if !convert::handle_convert(&config, cli.verbose, cli.json) {
        std::process::exit(EXIT_FAILURE);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
