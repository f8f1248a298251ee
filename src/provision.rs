//! The provisioning pass: link every eligible source file into the
//! output directory.
//!
//! A single linear pass:
//!
//! ```text
//! create output dir
//!   └── for data/ then fine_tuned_models/
//!         ├── missing?  -> warning, no entries
//!         └── each eligible direct child -> Linker::ensure_linked
//! completion line
//! ```

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{Layout, SourceSet};
use crate::diagnostics::{dir_label, Diagnostic, Diagnostics};
use crate::error::{ProvisionError, Result};
use crate::link::{LinkOutcome, Linker};
use crate::platform::Platform;
use crate::ports::FileSystem;

/// How a pass should run.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionOptions {
    /// Platform whose link strategies are used.
    pub platform: Platform,
    /// Print diagnostics to stdout as they are emitted.
    pub echo: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self { platform: Platform::current(), echo: true }
    }
}

/// One eligible source file and what happened to its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    /// Source file.
    pub source: PathBuf,
    /// Destination entry in the output directory.
    pub destination: PathBuf,
    /// What the linker did.
    pub outcome: LinkOutcome,
}

/// Summary of a completed pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    /// Output directory that received the entries.
    pub output_dir: PathBuf,
    /// One report per eligible source file, in processing order.
    pub entries: Vec<EntryReport>,
    /// Diagnostics emitted during the pass, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ProvisionReport {
    /// Number of destination entries created by this pass.
    #[must_use]
    pub fn created(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, LinkOutcome::Created(_)))
            .count()
    }

    /// Number of destinations that already existed and were skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == LinkOutcome::AlreadyPresent)
            .count()
    }
}

/// Run one provisioning pass over `layout`.
///
/// Missing or unreadable source directories produce warnings and
/// contribute nothing. Entries created before a fatal error stay in place.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or a copy
/// fallback fails.
pub fn provision(
    fs: &dyn FileSystem,
    layout: &Layout,
    options: &ProvisionOptions,
) -> Result<ProvisionReport> {
    let mut diagnostics = if options.echo { Diagnostics::echoing() } else { Diagnostics::silent() };

    fs.create_dir_all(&layout.output_dir).map_err(|source| {
        ProvisionError::CreateOutputDir { path: layout.output_dir.clone(), source }
    })?;

    let sources = layout.sources();
    let present: Vec<bool> = sources
        .iter()
        .map(|set| {
            let exists = fs.exists(set.dir);
            if !exists {
                tracing::debug!(dir = %set.dir.display(), "source directory missing");
                diagnostics.emit(Diagnostic::MissingSource { label: dir_label(set.dir) });
            }
            exists
        })
        .collect();

    let mut queue = Vec::new();
    for (set, present) in sources.iter().zip(present) {
        if present {
            queue.extend(eligible_children(fs, set, &mut diagnostics));
        }
    }

    let linker = Linker::new(fs, options.platform);
    let mut entries = Vec::new();
    for source in queue {
        let Some(name) = source.file_name() else {
            continue;
        };
        let destination = layout.output_dir.join(name);
        let outcome = linker.ensure_linked(&source, &destination, &mut diagnostics)?;
        entries.push(EntryReport { source, destination, outcome });
    }

    diagnostics.emit(Diagnostic::Done { output: dir_label(&layout.output_dir) });
    tracing::info!(
        entries = entries.len(),
        output = %layout.output_dir.display(),
        "provisioning finished"
    );

    Ok(ProvisionReport {
        output_dir: layout.output_dir.clone(),
        entries,
        diagnostics: diagnostics.into_entries(),
    })
}

/// Direct children of a source directory that pass its extension rule.
fn eligible_children(
    fs: &dyn FileSystem,
    set: &SourceSet<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<PathBuf> {
    match fs.list_dir(set.dir) {
        Ok(names) => names
            .into_iter()
            .filter(|name| set.rule.matches(name))
            .map(|name| set.dir.join(name))
            .collect(),
        Err(err) => {
            diagnostics.emit(Diagnostic::UnreadableSource {
                label: dir_label(set.dir),
                error: err.to_string(),
            });
            Vec::new()
        }
    }
}
