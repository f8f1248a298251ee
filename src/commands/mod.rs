//! Command dispatch and handlers.

pub mod provision;

use crate::cli::Cli;
use crate::context::ServiceContext;

/// Dispatch a parsed command line to the provisioning handler.
///
/// With `--record <FILE>`, every filesystem call is recorded to a cassette
/// at that path. The cassette is written even when provisioning fails.
///
/// # Errors
///
/// Returns an error string if provisioning or writing the recording fails.
/// When both fail, both messages are returned, one per line.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let layout = provision::layout_from(cli)?;
    let ctx = match &cli.record {
        Some(path) => ServiceContext::recording(path, &layout.root),
        None => ServiceContext::live(),
    };

    let result = provision::run(&ctx, &layout, cli.json);

    // Finish recording after the pass completes (even on error)
    let recorded = ctx.finish_recording();
    if let Ok(Some(path)) = &recorded {
        eprintln!("Recording saved to: {}", path.display());
    }

    match (result, recorded) {
        (Err(err), Err(record_err)) => Err(format!("{err}\n{record_err}")),
        (Err(err), Ok(_)) | (Ok(()), Err(err)) => Err(err),
        (Ok(()), Ok(_)) => Ok(()),
    }
}
