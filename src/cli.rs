//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `nblink`.
///
/// Every flag is optional; with none, the conventional layout under the
/// current directory is provisioned.
#[derive(Debug, Parser)]
#[command(
    name = "nblink",
    version,
    about = "Link data and model files into notebooks/ so legacy notebooks run unchanged"
)]
pub struct Cli {
    /// Root the default directories are resolved against.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Data directory (default: data).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Models directory (default: `fine_tuned_models`).
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,
    /// Output directory (default: notebooks).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Print the report as JSON instead of diagnostic lines.
    #[arg(long)]
    pub json: bool,
    /// Write a YAML trace of every filesystem call to this file.
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,
}
