//! CLI handler for the conversion run

use snscript_core::config::ConvertConfig;
use snscript_core::convert::{ConvertReport, Converter};
use snscript_core::error::SnScriptError;
use snscript_core::fs::RealFileSystem;

/// Printed to stdout after every successful run
pub const COMPLETION_MESSAGE: &str = "Script Include normalization complete";

/// Handle a conversion run
/// Returns true on success, false on a fatal error
pub fn handle_convert(config: &ConvertConfig, verbose: bool, json: bool) -> bool {
    log::debug!(
        "Converting {} -> {}",
        config.update_dir().display(),
        config.output_dir().display()
    );
    let converter = Converter::new(RealFileSystem);

    let report = match converter.run(config) {
        Ok(report) => report,
        Err(SnScriptError::MissingDirectory(path)) => {
            eprintln!("Update directory not found: {}", path.display());
            return false;
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    if json {
        return print_json(&report);
    }

    if verbose || config.dry_run {
        print_file_lines(&report);
    }
    if report.failed() > 0 {
        eprintln!("⚠ {}", report);
    } else if verbose {
        println!("{}", report);
    }
    if config.dry_run {
        println!("(dry run - no changes made)");
    }

    println!("{}", COMPLETION_MESSAGE);
    true
}

fn print_file_lines(report: &ConvertReport) {
    for outcome in &report.files {
        let file_name = outcome
            .source
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        println!("  {}: {}", file_name, outcome.status);
    }
}

fn print_json(report: &ConvertReport) -> bool {
    match serde_json::to_string_pretty(report) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("✗ Failed to serialize report: {}", e);
            false
        }
    }
}
