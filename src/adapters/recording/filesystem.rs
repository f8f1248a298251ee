//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{EntryKind, FileSystem, PortError};

const PORT: &str = "fs";

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
struct LinkInput {
    source: String,
    destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<EntryKind>,
}

impl LinkInput {
    fn new(source: &Path, destination: &Path, kind: Option<EntryKind>) -> Self {
        Self {
            source: source.display().to_string(),
            destination: destination.display().to_string(),
            kind,
        }
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        record_interaction(&self.recorder, PORT, "exists", &PathInput::new(path), &result);
        result
    }

    fn is_symlink(&self, path: &Path) -> bool {
        let result = self.inner.is_symlink(path);
        record_interaction(&self.recorder, PORT, "is_symlink", &PathInput::new(path), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, PORT, "is_dir", &PathInput::new(path), &result);
        result
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.create_dir_all(path);
        record_result(&self.recorder, PORT, "create_dir_all", &PathInput::new(path), &result);
        result
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let result = self.inner.list_dir(path);
        record_result(&self.recorder, PORT, "list_dir", &PathInput::new(path), &result);
        result
    }

    fn symlink(
        &self,
        source: &Path,
        destination: &Path,
        kind: EntryKind,
    ) -> Result<(), PortError> {
        let result = self.inner.symlink(source, destination, kind);
        let input = LinkInput::new(source, destination, Some(kind));
        record_result(&self.recorder, PORT, "symlink", &input, &result);
        result
    }

    fn hard_link(&self, source: &Path, destination: &Path) -> Result<(), PortError> {
        let result = self.inner.hard_link(source, destination);
        let input = LinkInput::new(source, destination, None);
        record_result(&self.recorder, PORT, "hard_link", &input, &result);
        result
    }

    fn junction(&self, source: &Path, destination: &Path) -> Result<(), PortError> {
        let result = self.inner.junction(source, destination);
        let input = LinkInput::new(source, destination, None);
        record_result(&self.recorder, PORT, "junction", &input, &result);
        result
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64, PortError> {
        let result = self.inner.copy_file(source, destination);
        let input = LinkInput::new(source, destination, None);
        record_result(&self.recorder, PORT, "copy_file", &input, &result);
        result
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.remove_file(path);
        record_result(&self.recorder, PORT, "remove_file", &PathInput::new(path), &result);
        result
    }
}
