//! Storage directory contract

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::mock;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The path could not be made into a writable directory
    #[error("please create writable directory {}", path.display())]
    StorageUnavailable {
        /// The offending path
        path: PathBuf,
    },
}

/// Makes sure a storage directory exists and can be written to
pub trait StorageProvisioner {
    /// Creates `path` if needed and checks that it is a writable directory.
    ///
    /// # Returns
    /// - [`Ok`] when `path` is a writable directory.
    /// - [`Err`] containing [`StorageError::StorageUnavailable`] otherwise.
    fn ensure_writable(&self, path: &Path) -> Result<(), StorageError>;
}

#[cfg(test)]
mock! {
    pub StorageProvisioner {}

    impl StorageProvisioner for StorageProvisioner {
        fn ensure_writable(&self, path: &Path) -> Result<(), StorageError>;
    }
}
