use super::record::LogRecord;
use serde::Serialize;

/// A BEGIN record matched with its END (if any).
#[derive(Debug, Clone, Serialize)]
pub struct TrackedSession {
    pub begin: LogRecord,
    pub end: Option<LogRecord>,
    pub duration_minutes: i64,
}

impl TrackedSession {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct DaySummary {
    pub records: Vec<LogRecord>,
    pub sessions: Vec<TrackedSession>,
    pub total_minutes: i64,
}
