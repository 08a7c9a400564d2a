use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// File name prefix of the daily rolling log; files are `{prefix}.{YYYY-MM-DD}`.
pub const LOG_FILE_PREFIX: &str = "vpnstats.log";

pub trait LogRepository: Send + Sync {
    /// Dates with a log file, newest first.
    fn get_logs(&self) -> Result<Vec<String>>;

    fn get_log(&self, date: &str) -> Result<Vec<String>>;
}

pub struct LogRepositoryImpl {
    log_dir: PathBuf,
}

impl LogRepositoryImpl {
    pub fn new(log_dir: &Path) -> Self {
        Self {
            log_dir: log_dir.to_path_buf(),
        }
    }
}

impl LogRepository for LogRepositoryImpl {
    fn get_logs(&self) -> Result<Vec<String>> {
        if !self.log_dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("{}.", LOG_FILE_PREFIX);
        let mut dates: Vec<String> = fs::read_dir(&self.log_dir)
            .with_context(|| format!("Failed to list {}", self.log_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter_map(|name| name.strip_prefix(&prefix).map(str::to_string))
            .filter(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok())
            .collect();

        dates.sort_unstable_by(|a, b| b.cmp(a));
        Ok(dates)
    }

    fn get_log(&self, date: &str) -> Result<Vec<String>> {
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("no log for '{}'", date)).into());
        }

        let path = self.log_dir.join(format!("{}.{}", LOG_FILE_PREFIX, date));
        let content = fs::read_to_string(&path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_dated_log_files_newest_first() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("vpnstats.log.2024-02-21"), "a\n").unwrap();
        fs::write(tmp.path().join("vpnstats.log.2024-02-22"), "b\n").unwrap();
        fs::write(tmp.path().join("other.txt"), "c\n").unwrap();

        let repo = LogRepositoryImpl::new(tmp.path());
        assert_eq!(repo.get_logs().unwrap(), vec!["2024-02-22", "2024-02-21"]);
    }

    #[test]
    fn rejects_dates_that_are_not_dates() {
        let tmp = tempdir().unwrap();
        let repo = LogRepositoryImpl::new(tmp.path());

        let err = repo.get_log("../secrets").unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
