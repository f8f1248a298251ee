//! Error types for provisioning.
//!
//! Only failures that abort the pass live here. Link failures are
//! recovered inside the linker and surface as diagnostics instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::PortError;

/// Fatal error raised by a provisioning pass.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The output directory could not be created.
    #[error("Could not create output directory {}: {source}", path.display())]
    CreateOutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: PortError,
    },

    /// The copy fallback failed, so the file could not be provisioned at all.
    #[error("Could not copy {} to {}: {source}", source_path.display(), destination.display())]
    Copy {
        /// File that was being copied.
        source_path: PathBuf,
        /// Destination the copy was written to.
        destination: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: PortError,
    },
}

/// Result alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_error_names_the_failing_file() {
        let err = ProvisionError::Copy {
            source_path: PathBuf::from("data/a.csv"),
            destination: PathBuf::from("notebooks/a.csv"),
            source: "disk full".into(),
        };
        let message = err.to_string();
        assert!(message.contains("data/a.csv"));
        assert!(message.contains("notebooks/a.csv"));
        assert!(message.contains("disk full"));
    }
}
