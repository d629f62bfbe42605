//! Per-run log file allocation.
//!
//! Files are named `<prefix>_<YYYYMMDD>_<NN>.log` with `NN` starting at `00`.
//! Each candidate is created exclusively, so two processes starting together
//! never end up sharing a file.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::LoggerError;

/// Name of the log file for a given prefix, date and index.
pub fn log_file_name(prefix: &str, date: NaiveDate, index: u32) -> String {
    format!("{prefix}_{}_{index:02}.log", date.format("%Y%m%d"))
}

/// Create `dir` (and parents) and then the first free log file in it.
pub fn create_log_file(
    dir: &Path,
    prefix: &str,
    date: NaiveDate,
) -> Result<(File, PathBuf), LoggerError> {
    fs::create_dir_all(dir).map_err(|source| LoggerError::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut index = 0u32;
    loop {
        let path = dir.join(log_file_name(prefix, date, index));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                index = index.checked_add(1).ok_or_else(|| LoggerError::LogFileCreate {
                    path: path.clone(),
                    source: e,
                })?;
            }
            Err(source) => return Err(LoggerError::LogFileCreate { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(log_file_name("hello", date(), 0), "hello_20240307_00.log");
        assert_eq!(log_file_name("hello", date(), 12), "hello_20240307_12.log");
        assert_eq!(log_file_name("hello", date(), 100), "hello_20240307_100.log");
    }

    #[test]
    fn test_index_increments_on_collision() {
        let tmp = tempfile::tempdir().unwrap();

        let (_a, first) = create_log_file(tmp.path(), "p", date()).unwrap();
        let (_b, second) = create_log_file(tmp.path(), "p", date()).unwrap();

        assert_eq!(first.file_name().unwrap(), "p_20240307_00.log");
        assert_eq!(second.file_name().unwrap(), "p_20240307_01.log");
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let taken = tmp.path().join("p_20240307_00.log");
        fs::write(&taken, "previous run").unwrap();

        let (_f, path) = create_log_file(tmp.path(), "p", date()).unwrap();
        assert_eq!(path.file_name().unwrap(), "p_20240307_01.log");
        assert_eq!(fs::read_to_string(&taken).unwrap(), "previous run");
    }

    #[test]
    fn test_unrelated_files_do_not_matter() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("other.txt"), "").unwrap();
        fs::write(tmp.path().join("q_20240307_00.log"), "").unwrap();

        let (_f, path) = create_log_file(tmp.path(), "p", date()).unwrap();
        assert_eq!(path.file_name().unwrap(), "p_20240307_00.log");
    }

    #[test]
    fn test_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b").join("c");

        let (_f, path) = create_log_file(&dir, "p", date()).unwrap();
        assert!(dir.is_dir());
        assert!(path.starts_with(&dir));
    }

    #[test]
    fn test_directory_create_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = create_log_file(&blocker.join("logs"), "p", date());
        assert!(matches!(result, Err(LoggerError::DirectoryCreate { .. })));
    }

    #[test]
    fn test_log_file_create_error() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = "x".repeat(300);

        let result = create_log_file(tmp.path(), &prefix, date());
        assert!(matches!(result, Err(LoggerError::LogFileCreate { .. })));
    }
}
