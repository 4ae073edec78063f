use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_DIR: &str = ".evmdis/logs";
const LOG_FILE_NAME: &str = "evmdis.log";
const MAX_LOG_FILES: usize = 10;
const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024; // 5MB

#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("failed to create log directory '{}': {source}", path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    #[error("permission denied for log directory '{}'", path.display())]
    PermissionDenied { path: PathBuf },
    #[error("log path '{}' exists but is not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("I/O error on log file '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Owns the log directory layout: `evmdis.log` plus numbered generations
/// `evmdis.log.1` (newest) through `evmdis.log.10` (oldest).
pub struct FileManager {
    log_dir: PathBuf,
}

impl FileManager {
    pub fn new() -> Self {
        Self::with_dir(LOG_DIR)
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            log_dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn ensure_log_directory(&self) -> Result<(), LogFileError> {
        if self.log_dir.exists() {
            return if self.log_dir.is_dir() {
                Ok(())
            } else {
                Err(LogFileError::NotADirectory { path: self.log_dir.clone() })
            };
        }

        fs::create_dir_all(&self.log_dir).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => LogFileError::PermissionDenied {
                path: self.log_dir.clone(),
            },
            _ => LogFileError::DirectoryCreationFailed {
                path: self.log_dir.clone(),
                source: e,
            },
        })
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    pub fn rotated_log_path(&self, generation: usize) -> PathBuf {
        if generation == 0 {
            self.log_file_path()
        } else {
            self.log_dir.join(format!("{}.{}", LOG_FILE_NAME, generation))
        }
    }

    pub fn should_rotate(&self) -> Result<bool, LogFileError> {
        let path = self.log_file_path();
        if !path.exists() {
            return Ok(false);
        }
        let metadata = fs::metadata(&path).map_err(|source| LogFileError::Io { path, source })?;
        Ok(metadata.len() >= MAX_FILE_SIZE)
    }

    /// Shifts every generation up by one and drops the oldest.
    pub fn rotate_files(&self) -> Result<(), LogFileError> {
        let oldest = self.rotated_log_path(MAX_LOG_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest).map_err(|source| LogFileError::Io { path: oldest, source })?;
        }

        for generation in (0..MAX_LOG_FILES).rev() {
            let from = self.rotated_log_path(generation);
            if from.exists() {
                let to = self.rotated_log_path(generation + 1);
                fs::rename(&from, &to).map_err(|source| LogFileError::Io { path: from, source })?;
            }
        }
        Ok(())
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let manager = FileManager::new();
        assert_eq!(manager.log_file_path(), PathBuf::from(LOG_DIR).join(LOG_FILE_NAME));
        assert_eq!(manager.rotated_log_path(0), manager.log_file_path());
        assert_eq!(
            manager.rotated_log_path(3),
            PathBuf::from(LOG_DIR).join("evmdis.log.3")
        );
    }

    #[test]
    fn test_ensure_log_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("nested").join("logs");
        let manager = FileManager::with_dir(&log_dir);

        manager.ensure_log_directory().unwrap();
        assert!(log_dir.is_dir());
        // Second call is a no-op
        manager.ensure_log_directory().unwrap();
    }

    #[test]
    fn test_log_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("not_a_dir");
        fs::write(&path, "x").unwrap();

        let err = FileManager::with_dir(&path).ensure_log_directory().unwrap_err();
        assert!(matches!(err, LogFileError::NotADirectory { .. }));
    }

    #[test]
    fn test_should_rotate() {
        let temp_dir = TempDir::new().unwrap();
        let manager = FileManager::with_dir(temp_dir.path());
        assert!(!manager.should_rotate().unwrap());

        fs::write(manager.log_file_path(), "small").unwrap();
        assert!(!manager.should_rotate().unwrap());

        fs::write(manager.log_file_path(), vec![b'x'; MAX_FILE_SIZE as usize]).unwrap();
        assert!(manager.should_rotate().unwrap());
    }

    #[test]
    fn test_rotation_shifts_generations() {
        let temp_dir = TempDir::new().unwrap();
        let manager = FileManager::with_dir(temp_dir.path());

        fs::write(manager.log_file_path(), "current").unwrap();
        fs::write(manager.rotated_log_path(1), "older").unwrap();
        fs::write(manager.rotated_log_path(MAX_LOG_FILES), "oldest").unwrap();

        manager.rotate_files().unwrap();

        assert!(!manager.log_file_path().exists());
        assert_eq!(fs::read_to_string(manager.rotated_log_path(1)).unwrap(), "current");
        assert_eq!(fs::read_to_string(manager.rotated_log_path(2)).unwrap(), "older");
        // The oldest generation is dropped, not shifted out of range
        assert!(!manager.rotated_log_path(MAX_LOG_FILES + 1).exists());
        assert!(!manager.rotated_log_path(MAX_LOG_FILES).exists());
    }
}
