//! Filesystem port for inspecting and provisioning directory entries.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type returned by port operations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Whether a source entry is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file (or anything that is not a directory).
    File,
    /// A directory.
    Directory,
}

/// Provides the filesystem primitives the linker is built from.
///
/// Abstracting the filesystem lets tests inject link failures and lets
/// the recording adapter capture every call a provisioning pass makes.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists, following links.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path itself is a link, even a dangling one.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Returns `true` if the path resolves to a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates a directory and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;

    /// Lists the entry names of a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError>;

    /// Creates a symbolic link at `destination` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses the link (missing
    /// privilege, unsupported filesystem, destination taken).
    fn symlink(&self, source: &Path, destination: &Path, kind: EntryKind)
        -> Result<(), PortError>;

    /// Creates a hard link at `destination` for the file `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created (e.g. across volumes).
    fn hard_link(&self, source: &Path, destination: &Path) -> Result<(), PortError>;

    /// Creates a directory junction at `destination` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if junctions are unsupported or the call fails.
    fn junction(&self, source: &Path, destination: &Path) -> Result<(), PortError>;

    /// Copies a file byte for byte, preserving metadata where possible.
    /// Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the destination
    /// cannot be written.
    fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64, PortError>;

    /// Removes a file or a link (not its target).
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), PortError>;
}
