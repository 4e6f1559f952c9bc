use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only text log of one whitelist run, flushed when dropped.
pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// `whitelist_2024-01-31_13-05-09.log`
    pub fn file_name(started_at: &DateTime<Local>) -> String {
        format!("whitelist_{}.log", started_at.format("%Y-%m-%d_%H-%M-%S"))
    }

    pub fn create<P: AsRef<Path>>(directory: P, started_at: &DateTime<Local>) -> Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;

        let path = directory.join(Self::file_name(started_at));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        tracing::info!("📝 Writing run log to {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush run log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn started_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 31, 13, 5, 9).unwrap()
    }

    #[test]
    fn test_file_name_uses_start_timestamp() {
        assert_eq!(
            RunLog::file_name(&started_at()),
            "whitelist_2024-01-31_13-05-09.log"
        );
    }

    #[test]
    fn test_lines_are_flushed_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let path = {
            let mut log = RunLog::create(&log_dir, &started_at()).unwrap();
            log.write_line("Line 1: Filter 100 created for Alice at number 5145551234.")
                .unwrap();
            log.write_line("").unwrap();
            log.path().to_path_buf()
        };

        assert_eq!(path, log_dir.join("whitelist_2024-01-31_13-05-09.log"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Line 1: Filter 100 created for Alice at number 5145551234.\n\n"
        );
    }

    #[test]
    fn test_existing_log_is_appended() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut log = RunLog::create(temp_dir.path(), &started_at()).unwrap();
            log.write_line("first").unwrap();
        }
        {
            let mut log = RunLog::create(temp_dir.path(), &started_at()).unwrap();
            log.write_line("second").unwrap();
        }

        let content =
            std::fs::read_to_string(temp_dir.path().join(RunLog::file_name(&started_at())))
                .unwrap();
        assert_eq!(content, "first\nsecond\n");
    }
}
