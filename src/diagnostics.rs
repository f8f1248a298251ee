//! User-facing diagnostic lines printed during a provisioning pass.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// One line of feedback for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A source directory does not exist; it contributes no entries.
    MissingSource {
        /// Directory label, e.g. `data/`.
        label: String,
    },
    /// A source directory exists but could not be listed.
    UnreadableSource {
        /// Directory label, e.g. `data/`.
        label: String,
        /// Why listing failed.
        error: String,
    },
    /// Every link mechanism failed for a source entry.
    LinkFailed {
        /// Base name of the source entry.
        file: String,
        /// Error from the last link attempt.
        error: String,
        /// Whether a copy is attempted next (files only).
        copying: bool,
    },
    /// The pass finished.
    Done {
        /// Output directory label, e.g. `notebooks/`.
        output: String,
    },
}

impl Diagnostic {
    /// Returns `true` for diagnostics the user should act on.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::Done { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource { label } => write!(f, "WARNING: {label} not found."),
            Self::UnreadableSource { label, error } => {
                write!(f, "WARNING: {label} could not be read: {error}.")
            }
            Self::LinkFailed { file, error, copying: true } => {
                write!(f, "Could not link {file}: {error}. Copying instead.")
            }
            Self::LinkFailed { file, error, copying: false } => {
                write!(f, "Could not link {file}: {error}.")
            }
            Self::Done { output } => write!(
                f,
                "Done: links created in {output}. If you see no errors, you can run notebooks unchanged."
            ),
        }
    }
}

/// Collects diagnostics and optionally echoes each one to stdout as it
/// is emitted, so lines printed before a fatal error are not lost.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    echo: bool,
}

impl Diagnostics {
    /// A sink that prints every diagnostic as it arrives.
    #[must_use]
    pub fn echoing() -> Self {
        Self { entries: Vec::new(), echo: true }
    }

    /// A sink that only collects.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Record a diagnostic, printing it if this sink echoes.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if self.echo {
            println!("{diagnostic}");
        }
        self.entries.push(diagnostic);
    }

    /// Diagnostics emitted so far.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of warnings emitted so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_warning()).count()
    }

    /// Consume the sink, returning the collected diagnostics.
    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Short label for a directory: its last component with a trailing slash.
#[must_use]
pub fn dir_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => format!("{}/", name.to_string_lossy()),
        None => path.display().to_string(),
    }
}
