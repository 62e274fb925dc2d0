//! Command-line argument structures

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snscript")]
#[command(version)]
#[command(
    about = "Normalize ServiceNow Script Includes from CI/CD update XML",
    long_about = "Reads sys_script_include_*.xml files from <SOURCE_DIR>/update and writes one \
                  annotated .js file per Script Include to <TARGET_APP_DIR>/script_includes."
)]
pub struct Cli {
    /// CI/CD export root containing an `update` directory
    pub source_dir: PathBuf,

    /// Application directory; output goes to its `script_includes` subdirectory
    pub target_app_dir: PathBuf,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print one line per processed file
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the run report as JSON instead of the summary line
    #[arg(long)]
    pub json: bool,
}
