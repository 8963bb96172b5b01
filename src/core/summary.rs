use crate::models::action::Action;
use crate::models::record::LogRecord;
use crate::models::session_summary::{DaySummary, TrackedSession};
use tracing::debug;

/// Pair BEGIN/END records of one day into sessions.
///
/// Records are taken in chronological order. A BEGIN without END stays open;
/// an END that does not close the open BEGIN of the same task is ignored.
pub fn build_day_summary(records: &[LogRecord]) -> DaySummary {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.timestamp);

    let mut sessions = Vec::new();
    let mut open: Option<LogRecord> = None;

    for rec in &sorted {
        match rec.action {
            Action::Begin => {
                if let Some(prev) = open.take() {
                    sessions.push(open_session(prev));
                }
                open = Some(rec.clone());
            }
            Action::End => match open.take() {
                Some(begin) if begin.code == rec.code => {
                    let duration = (rec.timestamp - begin.timestamp).num_minutes();
                    sessions.push(TrackedSession {
                        begin,
                        end: Some(rec.clone()),
                        duration_minutes: duration,
                    });
                }
                other => {
                    debug!(code = %rec.code, "END without matching BEGIN");
                    open = other;
                }
            },
        }
    }

    if let Some(prev) = open {
        sessions.push(open_session(prev));
    }

    let total_minutes = sessions.iter().map(|s| s.duration_minutes).sum();

    DaySummary {
        records: sorted,
        sessions,
        total_minutes,
    }
}

fn open_session(begin: LogRecord) -> TrackedSession {
    TrackedSession {
        begin,
        end: None,
        duration_minutes: 0,
    }
}
