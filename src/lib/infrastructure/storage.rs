//! Storage directory provisioning

use std::{fs, path::Path};

use tracing::debug;
use uuid::Uuid;

use crate::domain::communication::storage::{StorageError, StorageProvisioner};

/// Makes sure storage directories exist and can be written to
#[derive(Debug, Clone, Copy)]
pub struct DirectoryProvisioner {
    mode: u32,
}

impl Default for DirectoryProvisioner {
    fn default() -> Self {
        Self { mode: 0o777 }
    }
}

impl DirectoryProvisioner {
    /// Creates a provisioner that applies `mode` to the directories it touches
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    #[cfg(unix)]
    fn normalize_mode(&self, path: &Path) {
        use std::os::unix::fs::PermissionsExt;

        if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(self.mode)) {
            debug!(path = %path.display(), "could not set directory mode: {e}");
        }
    }

    #[cfg(not(unix))]
    fn normalize_mode(&self, _path: &Path) {}
}

impl StorageProvisioner for DirectoryProvisioner {
    /// Creates `path` recursively if needed, normalizes the mode of the
    /// resulting directory and checks that it can be written to.
    fn ensure_writable(&self, path: &Path) -> Result<(), StorageError> {
        // Failures here are reported by the checks below.
        if let Err(e) = fs::create_dir_all(path) {
            debug!(path = %path.display(), "could not create directory: {e}");
        }

        if !path.is_dir() {
            return Err(StorageError::StorageUnavailable {
                path: path.to_path_buf(),
            });
        }

        self.normalize_mode(path);

        if !is_writable(path) {
            return Err(StorageError::StorageUnavailable {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }
}

fn is_writable(path: &Path) -> bool {
    let probe = path.join(format!(".write-probe-{}", Uuid::now_v7()));

    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(_) => fs::remove_file(&probe).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_creates_missing_directories_recursively() -> TestResult {
        let root = tempfile::tempdir()?;
        let target = root.path().join("temp").join("sent-emails");

        DirectoryProvisioner::default().ensure_writable(&target)?;

        assert!(target.is_dir());

        Ok(())
    }

    #[test]
    fn test_accepts_existing_directory() -> TestResult {
        let root = tempfile::tempdir()?;

        DirectoryProvisioner::default().ensure_writable(root.path())?;

        assert_eq!(fs::read_dir(root.path())?.count(), 0);

        Ok(())
    }

    #[test]
    fn test_regular_file_is_unavailable() -> TestResult {
        let root = tempfile::tempdir()?;
        let file = root.path().join("not-a-directory");
        fs::write(&file, "")?;

        let result = DirectoryProvisioner::default().ensure_writable(&file);

        assert!(matches!(
            result,
            Err(StorageError::StorageUnavailable { path }) if path == file
        ));

        Ok(())
    }

    #[test]
    fn test_path_below_regular_file_is_unavailable() -> TestResult {
        let root = tempfile::tempdir()?;
        let file = root.path().join("blocker");
        fs::write(&file, "")?;
        let target = file.join("templates");

        let result = DirectoryProvisioner::default().ensure_writable(&target);

        assert!(matches!(
            result,
            Err(StorageError::StorageUnavailable { path }) if path == target
        ));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_rejected_regular_file_keeps_its_mode() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir()?;
        let file = root.path().join("config.txt");
        fs::write(&file, "")?;
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644))?;

        let result = DirectoryProvisioner::default().ensure_writable(&file);

        assert!(result.is_err());
        assert_eq!(fs::metadata(&file)?.permissions().mode() & 0o777, 0o644);

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_mode_is_normalized() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir()?;
        let target = root.path().join("sent-emails");
        fs::create_dir(&target)?;
        fs::set_permissions(&target, fs::Permissions::from_mode(0o700))?;

        DirectoryProvisioner::new(0o750).ensure_writable(&target)?;

        assert_eq!(fs::metadata(&target)?.permissions().mode() & 0o777, 0o750);

        Ok(())
    }
}
