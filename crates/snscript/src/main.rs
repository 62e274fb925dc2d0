//! `snscript` - normalize ServiceNow Script Includes from CI/CD update XML

/// CLI module - command-line interface for snscript
mod cli;

fn main() {
    cli::run_cli();
}
