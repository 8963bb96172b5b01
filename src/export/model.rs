// src/export/model.rs

use crate::models::session_summary::TrackedSession;
use serde::Serialize;

/// Flat row for CSV / JSON export of a tracked session.
#[derive(Serialize, Clone, Debug)]
pub struct SessionExport {
    pub date: String,
    pub code: String,
    pub option: String,
    pub summary: String,
    pub begin: String,
    pub end: String,
    pub minutes: i64,
    pub countdown: u32,
}

impl From<&TrackedSession> for SessionExport {
    fn from(s: &TrackedSession) -> Self {
        Self {
            date: s.begin.date().format("%Y-%m-%d").to_string(),
            code: s.begin.code.clone(),
            option: s.begin.option.clone(),
            summary: s.begin.summary.clone(),
            begin: s.begin.timestamp_str(),
            end: s.end.as_ref().map(|e| e.timestamp_str()).unwrap_or_default(),
            minutes: s.duration_minutes,
            countdown: s.begin.countdown_minutes,
        }
    }
}
