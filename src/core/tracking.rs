//! Daily tracking files: `tracking_YYYY_MM_DD.csv` under the tracking directory.

use crate::errors::{AppError, AppResult};
use crate::models::record::LogRecord;
use crate::utils::path::tracking_file;
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct EventLogger {
    dir: PathBuf,
    options: Vec<String>,
}

impl EventLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            options: Vec::new(),
        }
    }

    /// Options recognised when reading records back (multi-word categories).
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the records of `date`.
    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        tracking_file(&self.dir, date)
    }

    /// Append `record` to the file of its own timestamp's day.
    ///
    /// Returns the path written to.
    pub fn record(&self, record: &LogRecord) -> AppResult<PathBuf> {
        let path = self.file_for(record.date());

        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Tracking(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AppError::Tracking(format!("cannot open {}: {e}", path.display())))?;

        let mut line = record.to_line();
        line.push('\n');
        file.write_all(line.as_bytes())
            .map_err(|e| AppError::Tracking(format!("cannot write {}: {e}", path.display())))?;

        info!(target: "goltime::tracking", "{}", record.to_line());
        Ok(path)
    }

    /// All parsable records of `date`, in file order. A missing file is an empty day.
    pub fn read_day(&self, date: NaiveDate) -> AppResult<Vec<LogRecord>> {
        let path = self.file_for(date);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let mut records = Vec::new();

        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match LogRecord::parse_line_with(line, &self.options) {
                Some(r) => records.push(r),
                None => debug!(file = %path.display(), line = n + 1, "skipping malformed line"),
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::action::Action;
    use crate::models::record::TIMESTAMP_FORMAT;
    use crate::models::task::Task;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn appends_across_calls_and_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = EventLogger::new(tmp.path().join("nested/tracking"));
        let task = Task::new("ABC-1", "dev", "Parser");

        logger
            .record(&LogRecord::new(Action::Begin, 25, &task, at("2024-03-05 09:00:00")))
            .unwrap();
        let path = logger
            .record(&LogRecord::new(Action::End, 25, &task, at("2024-03-05 09:25:00")))
            .unwrap();

        assert!(path.ends_with("tracking_2024_03_05.csv"));
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "BEGIN,  25,   2024-03-05 09:00:00   ABC-1.  dev Parser\n\
             END,  25,   2024-03-05 09:25:00   ABC-1.  dev Parser\n"
        );
    }

    #[test]
    fn records_roll_over_to_the_next_day_file() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = EventLogger::new(tmp.path());
        let task = Task::new("OPS-7", "ops", "Night shift");

        logger
            .record(&LogRecord::new(Action::Begin, 0, &task, at("2024-03-05 23:50:00")))
            .unwrap();
        logger
            .record(&LogRecord::new(Action::End, 0, &task, at("2024-03-06 00:10:00")))
            .unwrap();

        let d5 = logger.read_day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap();
        let d6 = logger.read_day(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()).unwrap();

        assert_eq!(d5.len(), 1);
        assert_eq!(d6.len(), 1);
        assert!(d5.iter().all(|r| r.date() == NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        assert!(d6.iter().all(|r| r.date() == NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()));
        assert_eq!(d6[0].action, Action::End);
    }

    #[test]
    fn read_day_skips_garbage_and_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = EventLogger::new(tmp.path());
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert!(logger.read_day(day).unwrap().is_empty());

        fs::write(
            logger.file_for(day),
            "garbage\n\nBEGIN,  0,   2024-01-02 08:00:00   X-1.  dev Thing\n",
        )
        .unwrap();
        let records = logger.read_day(day).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "X-1");
    }

    #[test]
    fn read_day_keeps_multi_word_options() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = EventLogger::new(tmp.path())
            .with_options(vec!["dev".into(), "code review".into()]);
        let task = Task::new("ABC-1", "code review", "Parser rewrite");

        logger
            .record(&LogRecord::new(Action::Begin, 25, &task, at("2024-03-05 09:00:00")))
            .unwrap();

        let records = logger.read_day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap();
        assert_eq!(records[0].option, "code review");
        assert_eq!(records[0].summary, "Parser rewrite");
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let logger = EventLogger::new(blocker.join("sub"));
        let task = Task::new("A", "b", "c");
        let err = logger
            .record(&LogRecord::new(Action::Begin, 0, &task, at("2024-03-05 09:00:00")))
            .unwrap_err();
        assert!(matches!(err, AppError::Tracking(_)));
    }
}
