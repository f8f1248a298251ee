//! Core library entry for the `nblink` CLI.
//!
//! Links (or, failing that, copies) data and model files into a single
//! working directory so notebooks expecting colocated inputs keep working.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod link;
pub mod platform;
pub mod ports;
pub mod provision;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or provisioning fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_provisions_given_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let result = run(["nblink", "--root", root.as_str()]);
        assert!(result.is_ok());
        assert!(dir.path().join("notebooks").is_dir());
    }

    #[test]
    fn run_errors_on_unknown_flag() {
        let result = run(["nblink", "--unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(run(["nblink", "--help"]).is_ok());
    }
}
