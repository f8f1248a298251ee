//! Idempotent creation of a single destination entry.
//!
//! The [`Linker`] walks the strategy plan for the host platform, stopping
//! at the first mechanism that works. Link failures degrade to the next
//! strategy; only a failed copy escapes as an error.

pub mod strategy;

use std::borrow::Cow;
use std::path::Path;

use serde::Serialize;

pub use strategy::{plan, Attempt, LinkKind, LinkStrategy};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ProvisionError, Result};
use crate::platform::Platform;
use crate::ports::{EntryKind, FileSystem};

/// What `ensure_linked` did for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// Something already existed at the destination; it was left alone.
    AlreadyPresent,
    /// The destination was created with the given mechanism.
    Created(LinkKind),
    /// No mechanism applied (a directory that could not be linked).
    Failed {
        /// Error from the last attempt.
        reason: String,
    },
}

/// Creates destination entries through a [`FileSystem`].
pub struct Linker<'a> {
    fs: &'a dyn FileSystem,
    platform: Platform,
}

impl<'a> Linker<'a> {
    /// Creates a linker for `platform` working through `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, platform: Platform) -> Self {
        Self { fs, platform }
    }

    /// Ensure `destination` refers to `source`, unless anything is already
    /// there (a dangling link included).
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Copy`] when every link attempt failed and
    /// the copy fallback failed too.
    pub fn ensure_linked(
        &self,
        source: &Path,
        destination: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<LinkOutcome> {
        if self.fs.exists(destination) || self.fs.is_symlink(destination) {
            tracing::debug!(destination = %destination.display(), "already present, skipping");
            return Ok(LinkOutcome::AlreadyPresent);
        }

        let source = link_target(source);
        let source = source.as_ref();
        let entry = if self.fs.is_dir(source) { EntryKind::Directory } else { EntryKind::File };
        let mut last_error: Option<String> = None;

        for strategy in plan(self.platform, entry) {
            if strategy.kind() == LinkKind::Copy {
                if let Some(error) = &last_error {
                    diagnostics.emit(Diagnostic::LinkFailed {
                        file: display_name(source),
                        error: error.clone(),
                        copying: entry == EntryKind::File,
                    });
                }
            }

            match strategy.attempt(self.fs, source, destination, entry) {
                Attempt::Linked => {
                    tracing::info!(
                        source = %source.display(),
                        destination = %destination.display(),
                        kind = ?strategy.kind(),
                        "provisioned"
                    );
                    return Ok(LinkOutcome::Created(strategy.kind()));
                }
                Attempt::Recoverable(err) => {
                    tracing::debug!(
                        source = %source.display(),
                        kind = ?strategy.kind(),
                        "attempt failed: {err}"
                    );
                    last_error = Some(err.to_string());
                }
                Attempt::Fatal(err) => {
                    return Err(ProvisionError::Copy {
                        source_path: source.to_path_buf(),
                        destination: destination.to_path_buf(),
                        source: err,
                    });
                }
            }
        }

        Ok(LinkOutcome::Failed { reason: last_error.unwrap_or_default() })
    }
}

/// A link's target resolves against the link's own directory, so relative
/// sources are anchored to the working directory first.
fn link_target(source: &Path) -> Cow<'_, Path> {
    if source.is_absolute() {
        return Cow::Borrowed(source);
    }
    std::path::absolute(source).map_or(Cow::Borrowed(source), Cow::Owned)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    fn setup() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.csv");
        std::fs::write(&source, "x\n1\n").unwrap();
        (dir, source)
    }

    #[cfg(unix)]
    #[test]
    fn creates_symlink_on_unix() {
        let (dir, source) = setup();
        let destination = dir.path().join("link.csv");
        let mut diagnostics = Diagnostics::silent();

        let outcome = Linker::new(&LiveFileSystem, Platform::Unix)
            .ensure_linked(&source, &destination, &mut diagnostics)
            .unwrap();

        assert_eq!(outcome, LinkOutcome::Created(LinkKind::Symlink));
        assert!(destination.is_symlink());
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "x\n1\n");
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn windows_plan_hard_links_files_on_same_volume() {
        let (dir, source) = setup();
        let destination = dir.path().join("linked.csv");
        let mut diagnostics = Diagnostics::silent();

        let outcome = Linker::new(&LiveFileSystem, Platform::Windows)
            .ensure_linked(&source, &destination, &mut diagnostics)
            .unwrap();

        assert_eq!(outcome, LinkOutcome::Created(LinkKind::HardLink));
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "x\n1\n");
    }

    #[test]
    fn existing_destination_is_left_alone() {
        let (dir, source) = setup();
        let destination = dir.path().join("taken.csv");
        std::fs::write(&destination, "old").unwrap();
        let mut diagnostics = Diagnostics::silent();

        let outcome = Linker::new(&LiveFileSystem, Platform::current())
            .ensure_linked(&source, &destination, &mut diagnostics)
            .unwrap();

        assert_eq!(outcome, LinkOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "old");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_counts_as_present() {
        let (dir, source) = setup();
        let destination = dir.path().join("dangling.csv");
        std::os::unix::fs::symlink(dir.path().join("gone.csv"), &destination).unwrap();
        let mut diagnostics = Diagnostics::silent();

        let outcome = Linker::new(&LiveFileSystem, Platform::Unix)
            .ensure_linked(&source, &destination, &mut diagnostics)
            .unwrap();

        assert_eq!(outcome, LinkOutcome::AlreadyPresent);
        assert!(!destination.exists());
    }

    #[cfg(not(windows))]
    #[test]
    fn windows_plan_reports_unlinkable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("shards.parquet");
        std::fs::create_dir(&source).unwrap();
        let destination = dir.path().join("out.parquet");
        let mut diagnostics = Diagnostics::silent();

        // Junctions are unavailable off Windows and directories are never copied.
        let outcome = Linker::new(&LiveFileSystem, Platform::Windows)
            .ensure_linked(&source, &destination, &mut diagnostics)
            .unwrap();

        assert!(matches!(outcome, LinkOutcome::Failed { .. }));
        assert!(!destination.exists());
        assert!(matches!(
            diagnostics.entries(),
            [Diagnostic::LinkFailed { copying: false, .. }]
        ));
    }

    #[test]
    fn relative_sources_are_anchored_to_working_directory() {
        let target = link_target(Path::new("proj/data/a.csv"));
        assert!(target.is_absolute());
        assert!(target.ends_with("proj/data/a.csv"));

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(link_target(dir.path()), Cow::Borrowed(dir.path()));
    }

    #[test]
    fn missing_source_fails_after_copy_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("missing.csv");
        let destination = dir.path().join("nested").join("missing.csv");
        let mut diagnostics = Diagnostics::silent();

        let err = Linker::new(&LiveFileSystem, Platform::Windows)
            .ensure_linked(&source, &destination, &mut diagnostics)
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Copy { .. }));
        assert_eq!(diagnostics.warning_count(), 1);
    }
}
