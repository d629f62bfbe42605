//! Log path resolution.

use std::path::{Path, PathBuf};

use crate::error::LoggerError;

/// Directory components under the home directory holding plugin logs.
pub const LOG_ROOT: [&str; 3] = [".ssot", "gitspace", "logs"];

/// Log directory for a plugin: `<home>/.ssot/gitspace/logs/<name>/`.
pub fn plugin_log_dir(name: &str) -> Result<PathBuf, LoggerError> {
    let home = dirs::home_dir().ok_or(LoggerError::HomeDirUnavailable)?;
    Ok(log_dir_under(&home, name))
}

/// Log directory for a plugin below an explicit home directory.
pub fn log_dir_under(home: &Path, name: &str) -> PathBuf {
    LOG_ROOT
        .iter()
        .fold(home.to_path_buf(), |path, part| path.join(part))
        .join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_layout() {
        let dir = log_dir_under(Path::new("/home/ada"), "hello-world");
        assert_eq!(
            dir,
            PathBuf::from("/home/ada/.ssot/gitspace/logs/hello-world")
        );
    }
}
