//! Path utilities: expand ~ and build tracking file names.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `tracking_YYYY_MM_DD.csv`
pub fn tracking_file_name(date: NaiveDate) -> String {
    format!("tracking_{}.csv", date.format("%Y_%m_%d"))
}

pub fn tracking_file(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(tracking_file_name(date))
}
