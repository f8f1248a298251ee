//! Link strategies and the per-platform order they are tried in.

use std::path::Path;

use serde::Serialize;

use crate::platform::Platform;
use crate::ports::{EntryKind, FileSystem, PortError};

/// Mechanism that produced a destination entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Symbolic link.
    Symlink,
    /// Hard link.
    HardLink,
    /// Directory junction.
    Junction,
    /// Full byte-for-byte copy.
    Copy,
}

/// Result of a single strategy attempt.
#[derive(Debug)]
pub enum Attempt {
    /// The destination now refers to the source.
    Linked,
    /// This mechanism is unavailable here; the next one may work.
    Recoverable(PortError),
    /// Nothing further can be tried; the pass must abort.
    Fatal(PortError),
}

/// One way of making `destination` refer to `source`.
pub trait LinkStrategy {
    /// The mechanism this strategy uses.
    fn kind(&self) -> LinkKind;

    /// Try to create `destination` for `source`.
    fn attempt(
        &self,
        fs: &dyn FileSystem,
        source: &Path,
        destination: &Path,
        entry: EntryKind,
    ) -> Attempt;
}

/// Symbolic link; the preferred mechanism wherever it needs no privilege.
pub struct SymlinkStrategy;

impl LinkStrategy for SymlinkStrategy {
    fn kind(&self) -> LinkKind {
        LinkKind::Symlink
    }

    fn attempt(
        &self,
        fs: &dyn FileSystem,
        source: &Path,
        destination: &Path,
        entry: EntryKind,
    ) -> Attempt {
        match fs.symlink(source, destination, entry) {
            Ok(()) => Attempt::Linked,
            Err(err) => Attempt::Recoverable(err),
        }
    }
}

/// Hard link; files only, same volume only.
pub struct HardLinkStrategy;

impl LinkStrategy for HardLinkStrategy {
    fn kind(&self) -> LinkKind {
        LinkKind::HardLink
    }

    fn attempt(
        &self,
        fs: &dyn FileSystem,
        source: &Path,
        destination: &Path,
        entry: EntryKind,
    ) -> Attempt {
        if entry == EntryKind::Directory {
            return Attempt::Recoverable("hard links apply to files only".into());
        }
        match fs.hard_link(source, destination) {
            Ok(()) => Attempt::Linked,
            Err(err) => Attempt::Recoverable(err),
        }
    }
}

/// Directory junction; directories only.
pub struct JunctionStrategy;

impl LinkStrategy for JunctionStrategy {
    fn kind(&self) -> LinkKind {
        LinkKind::Junction
    }

    fn attempt(
        &self,
        fs: &dyn FileSystem,
        source: &Path,
        destination: &Path,
        entry: EntryKind,
    ) -> Attempt {
        if entry == EntryKind::File {
            return Attempt::Recoverable("junctions apply to directories only".into());
        }
        match fs.junction(source, destination) {
            Ok(()) => Attempt::Linked,
            Err(err) => Attempt::Recoverable(err),
        }
    }
}

/// Full copy; the last resort for files. Its failure is fatal, and whatever
/// part of the destination was written is removed so a rerun copies again.
pub struct CopyStrategy;

impl LinkStrategy for CopyStrategy {
    fn kind(&self) -> LinkKind {
        LinkKind::Copy
    }

    fn attempt(
        &self,
        fs: &dyn FileSystem,
        source: &Path,
        destination: &Path,
        entry: EntryKind,
    ) -> Attempt {
        if entry == EntryKind::Directory {
            return Attempt::Recoverable("directories are linked, never copied".into());
        }
        match fs.copy_file(source, destination) {
            Ok(_) => Attempt::Linked,
            Err(err) => {
                discard_partial(fs, destination);
                Attempt::Fatal(err)
            }
        }
    }
}

fn discard_partial(fs: &dyn FileSystem, destination: &Path) {
    if !fs.exists(destination) && !fs.is_symlink(destination) {
        return;
    }
    if let Err(err) = fs.remove_file(destination) {
        tracing::warn!(
            destination = %destination.display(),
            "could not remove partial copy: {err}"
        );
    }
}

/// Ordered strategies for a source entry on `platform`. `CopyStrategy`
/// always comes last.
#[must_use]
pub fn plan(platform: Platform, entry: EntryKind) -> Vec<Box<dyn LinkStrategy>> {
    let mut strategies: Vec<Box<dyn LinkStrategy>> = if platform.has_unprivileged_symlinks() {
        vec![Box::new(SymlinkStrategy)]
    } else {
        match entry {
            EntryKind::File => vec![Box::new(HardLinkStrategy), Box::new(SymlinkStrategy)],
            EntryKind::Directory => vec![Box::new(JunctionStrategy)],
        }
    };
    strategies.push(Box::new(CopyStrategy));
    strategies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    fn kinds(platform: Platform, entry: EntryKind) -> Vec<LinkKind> {
        plan(platform, entry).iter().map(|s| s.kind()).collect()
    }

    #[test]
    fn unix_prefers_symlinks() {
        assert_eq!(kinds(Platform::Unix, EntryKind::File), [LinkKind::Symlink, LinkKind::Copy]);
        assert_eq!(
            kinds(Platform::Unix, EntryKind::Directory),
            [LinkKind::Symlink, LinkKind::Copy]
        );
    }

    #[test]
    fn windows_files_try_hard_link_then_symlink() {
        assert_eq!(
            kinds(Platform::Windows, EntryKind::File),
            [LinkKind::HardLink, LinkKind::Symlink, LinkKind::Copy]
        );
    }

    #[test]
    fn windows_directories_use_junctions() {
        assert_eq!(
            kinds(Platform::Windows, EntryKind::Directory),
            [LinkKind::Junction, LinkKind::Copy]
        );
    }

    #[test]
    fn copy_declines_directories_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out");
        let attempt =
            CopyStrategy.attempt(&LiveFileSystem, dir.path(), &destination, EntryKind::Directory);
        assert!(matches!(attempt, Attempt::Recoverable(_)));
        assert!(!destination.exists());
    }

    #[test]
    fn copy_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let attempt = CopyStrategy.attempt(
            &LiveFileSystem,
            &dir.path().join("missing.csv"),
            &dir.path().join("out.csv"),
            EntryKind::File,
        );
        assert!(matches!(attempt, Attempt::Fatal(_)));
    }

    #[test]
    fn hard_link_declines_directories() {
        let dir = tempfile::tempdir().unwrap();
        let attempt = HardLinkStrategy.attempt(
            &LiveFileSystem,
            dir.path(),
            &dir.path().join("out"),
            EntryKind::Directory,
        );
        assert!(matches!(attempt, Attempt::Recoverable(_)));
    }
}
