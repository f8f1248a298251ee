//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::{EntryKind, FileSystem, PortError};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name();
            match name.to_str() {
                Some(name) => entries.push(name.to_string()),
                None => tracing::warn!(
                    name = %name.to_string_lossy(),
                    directory = %path.display(),
                    "skipping entry whose name is not valid UTF-8"
                ),
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn symlink(
        &self,
        source: &Path,
        destination: &Path,
        kind: EntryKind,
    ) -> Result<(), PortError> {
        #[cfg(unix)]
        {
            let _ = kind;
            std::os::unix::fs::symlink(source, destination)?;
            Ok(())
        }
        #[cfg(windows)]
        {
            match kind {
                EntryKind::File => std::os::windows::fs::symlink_file(source, destination)?,
                EntryKind::Directory => std::os::windows::fs::symlink_dir(source, destination)?,
            }
            Ok(())
        }
        #[cfg(not(any(unix, windows)))]
        {
            let _ = (source, destination, kind);
            Err(unsupported("symbolic links are not available on this platform"))
        }
    }

    fn hard_link(&self, source: &Path, destination: &Path) -> Result<(), PortError> {
        Ok(std::fs::hard_link(source, destination)?)
    }

    fn junction(&self, source: &Path, destination: &Path) -> Result<(), PortError> {
        #[cfg(windows)]
        {
            let output = std::process::Command::new("cmd")
                .arg("/C")
                .arg("mklink")
                .arg("/J")
                .arg(destination)
                .arg(source)
                .output()?;
            if output.status.success() {
                return Ok(());
            }
            let mut message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if message.is_empty() {
                message = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            Err(format!(
                "mklink /J exited with {}: {message}",
                output.status.code().unwrap_or(-1)
            )
            .into())
        }
        #[cfg(not(windows))]
        {
            let _ = (source, destination);
            Err(unsupported("directory junctions are only available on Windows"))
        }
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64, PortError> {
        let bytes = std::fs::copy(source, destination)?;
        if let Err(err) = preserve_times(source, destination) {
            tracing::debug!(
                destination = %destination.display(),
                "could not preserve timestamps: {err}"
            );
        }
        Ok(bytes)
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::remove_file(path)?)
    }
}

/// Carries the access and modification times of `source` over to `destination`.
/// `std::fs::copy` already carries permissions.
fn preserve_times(source: &Path, destination: &Path) -> std::io::Result<()> {
    let meta = std::fs::metadata(source)?;
    let times = std::fs::FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    #[cfg(windows)]
    let file = std::fs::OpenOptions::new().write(true).open(destination)?;
    #[cfg(not(windows))]
    let file = std::fs::File::open(destination)?;
    file.set_times(times)
}

#[cfg(not(windows))]
fn unsupported(message: &str) -> PortError {
    Box::new(std::io::Error::new(std::io::ErrorKind::Unsupported, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_dir_returns_sorted_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.csv"), "b").unwrap();
        std::fs::write(dir.path().join("a.csv"), "a").unwrap();

        let names = LiveFileSystem.list_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["a.csv".to_string(), "b.csv".to_string()]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn list_dir_skips_names_that_are_not_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let bad = std::ffi::OsStr::from_bytes(b"bad\xff.csv");
        std::fs::write(dir.path().join(bad), "x").unwrap();
        std::fs::write(dir.path().join("good.csv"), "y").unwrap();

        let names = LiveFileSystem.list_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["good.csv".to_string()]);
    }

    #[test]
    fn list_dir_errors_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.list_dir(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn copy_preserves_content_and_modified_time() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src.csv");
        let destination = dir.path().join("dst.csv");
        std::fs::write(&source, "x,y\n1,2\n").unwrap();

        let bytes = LiveFileSystem.copy_file(&source, &destination).unwrap();

        assert_eq!(bytes, 8);
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "x,y\n1,2\n");
        let src_mtime = std::fs::metadata(&source).unwrap().modified().unwrap();
        let dst_mtime = std::fs::metadata(&destination).unwrap().modified().unwrap();
        assert_eq!(src_mtime, dst_mtime);
    }

    #[test]
    fn copy_fails_for_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = LiveFileSystem.copy_file(&dir.path().join("nope"), &dir.path().join("out"));
        assert!(result.is_err());
    }

    #[test]
    fn hard_link_shares_content() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("m.pt");
        let destination = dir.path().join("linked.pt");
        std::fs::write(&source, "weights").unwrap();

        LiveFileSystem.hard_link(&source, &destination).unwrap();

        assert!(!destination.is_symlink());
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "weights");
    }

    #[test]
    fn remove_file_deletes_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        std::fs::write(&path, "par").unwrap();

        LiveFileSystem.remove_file(&path).unwrap();

        assert!(!path.exists());
        assert!(LiveFileSystem.remove_file(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_detected_even_when_dangling() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("gone.csv");
        let destination = dir.path().join("link.csv");
        std::fs::write(&source, "a").unwrap();

        LiveFileSystem.symlink(&source, &destination, EntryKind::File).unwrap();
        std::fs::remove_file(&source).unwrap();

        let fs = LiveFileSystem;
        assert!(!fs.exists(&destination));
        assert!(fs.is_symlink(&destination));
    }

    #[cfg(not(windows))]
    #[test]
    fn junction_is_unsupported_off_windows() {
        let dir = tempfile::tempdir().unwrap();
        let err = LiveFileSystem
            .junction(dir.path(), &dir.path().join("j"))
            .unwrap_err();
        assert!(err.to_string().contains("only available on Windows"));
    }
}
