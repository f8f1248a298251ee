//! The provisioning command.

use serde::Serialize;

use crate::cli::Cli;
use crate::config::Layout;
use crate::context::ServiceContext;
use crate::provision::{provision, ProvisionOptions};

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

/// Resolve the layout from command-line overrides. The root is always
/// absolute.
///
/// # Errors
///
/// Returns an error string if no root is given and the current directory
/// cannot be determined.
pub fn layout_from(cli: &Cli) -> Result<Layout, String> {
    let root = match &cli.root {
        Some(root) => std::path::absolute(root)
            .map_err(|e| format!("Failed to resolve root {}: {e}", root.display()))?,
        None => std::env::current_dir()
            .map_err(|e| format!("Failed to determine current directory: {e}"))?,
    };
    let mut layout = Layout::at(root);
    if let Some(dir) = &cli.data_dir {
        layout = layout.with_data_dir(dir);
    }
    if let Some(dir) = &cli.models_dir {
        layout = layout.with_models_dir(dir);
    }
    if let Some(dir) = &cli.output_dir {
        layout = layout.with_output_dir(dir);
    }
    Ok(layout)
}

/// Execute a provisioning pass over `layout`.
///
/// Plain mode prints each diagnostic as it happens; JSON mode prints only
/// the final report.
///
/// # Errors
///
/// Returns an error string if the pass aborts or the report cannot be
/// serialized.
pub fn run(ctx: &ServiceContext, layout: &Layout, json: bool) -> Result<(), String> {
    let options = ProvisionOptions { echo: !json, ..ProvisionOptions::default() };
    let report = provision(ctx.fs.as_ref(), layout, &options).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&JsonOut { ok: true, data: &report })
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        println!("{out}");
    }
    Ok(())
}
