//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects a provisioning pass runs against.
///
/// Constructors wire up different adapter implementations (live,
/// recording, or any `FileSystem` a caller supplies).
pub struct ServiceContext {
    /// Filesystem used for every inspection and provisioning call.
    pub fs: Box<dyn FileSystem>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::with_fs(Box::new(LiveFileSystem))
    }

    /// Creates a context around a caller-provided filesystem.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs, recorder: None }
    }

    /// Creates a live context whose filesystem calls are recorded to the
    /// cassette at `path`. Call [`ServiceContext::finish_recording`] to
    /// write it.
    #[must_use]
    pub fn recording(path: &Path, root: &Path) -> Self {
        let name = path
            .file_stem()
            .map_or_else(|| "nblink".to_string(), |s| s.to_string_lossy().into_owned());
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            name,
            root.display().to_string(),
        )));
        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Returns `true` if this context records its filesystem calls.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Consumes the context and writes the cassette, returning its path.
    /// Returns `Ok(None)` for contexts that do not record.
    ///
    /// # Errors
    ///
    /// Returns an error string if the cassette cannot be written.
    pub fn finish_recording(self) -> Result<Option<std::path::PathBuf>, String> {
        let Self { fs, recorder } = self;
        // Release the adapter's clone of the recorder first.
        drop(fs);
        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        recorder
            .finish()
            .map(Some)
            .map_err(|e| format!("Failed to write cassette: {e}"))
    }
}
