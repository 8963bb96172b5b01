use super::action::Action;
use super::task::Task;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Timestamp layout used inside tracking lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One BEGIN/END line of a daily tracking file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub action: Action,
    pub countdown_minutes: u32,
    pub timestamp: NaiveDateTime,
    pub code: String,
    pub option: String,
    pub summary: String,
}

impl LogRecord {
    pub fn new(action: Action, countdown_minutes: u32, task: &Task, timestamp: NaiveDateTime) -> Self {
        Self {
            action,
            countdown_minutes,
            timestamp,
            code: task.code.clone(),
            option: task.option.clone(),
            summary: task.summary.clone(),
        }
    }

    /// Record stamped with the current local wall clock.
    pub fn now(action: Action, countdown_minutes: u32, task: &Task) -> Self {
        Self::new(action, countdown_minutes, task, Local::now().naive_local())
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `ACTION,  MINUTES,   TIMESTAMP   CODE.  OPTION SUMMARY` (no newline).
    pub fn to_line(&self) -> String {
        format!(
            "{},  {},   {}   {}.  {} {}",
            self.action,
            self.countdown_minutes,
            self.timestamp_str(),
            self.code,
            self.option,
            self.summary
        )
    }

    /// Parse a line produced by [`LogRecord::to_line`].
    ///
    /// Returns `None` for blank or foreign lines. Without a known option set
    /// the option is the first word after the code.
    pub fn parse_line(line: &str) -> Option<Self> {
        Self::parse_line_with(line, &[])
    }

    /// Like [`LogRecord::parse_line`], but an option from `known_options`
    /// may span several words. The longest matching option wins.
    pub fn parse_line_with(line: &str, known_options: &[String]) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);

        let (action, rest) = line.split_once(',')?;
        let action = Action::from_token(action)?;

        let (minutes, rest) = rest.split_once(',')?;
        let countdown_minutes = minutes.trim().parse::<u32>().ok()?;

        let rest = rest.trim_start();
        let ts = rest.get(..19)?;
        let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;

        let rest = rest.get(19..)?.trim_start();
        let (code, rest) = rest.split_once(".  ")?;
        let (option, summary) = split_option(rest, known_options);

        Some(Self {
            action,
            countdown_minutes,
            timestamp,
            code: code.to_string(),
            option: option.to_string(),
            summary: summary.to_string(),
        })
    }
}

fn split_option<'a>(rest: &'a str, known_options: &[String]) -> (&'a str, &'a str) {
    let known = known_options
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| {
            let tail = rest.strip_prefix(o.as_str())?;
            match tail.strip_prefix(' ') {
                Some(summary) => Some((o.len(), summary)),
                None if tail.is_empty() => Some((o.len(), "")),
                None => None,
            }
        })
        .max_by_key(|(len, _)| *len);

    match known {
        Some((len, summary)) => (&rest[..len], summary),
        None => rest.split_once(' ').unwrap_or((rest, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn line_layout_matches_tracking_format() {
        let task = Task::new("ABC-12", "dev", "Fix login page");
        let rec = LogRecord::new(Action::Begin, 25, &task, ts("2024-03-05 09:15:00"));
        assert_eq!(
            rec.to_line(),
            "BEGIN,  25,   2024-03-05 09:15:00   ABC-12.  dev Fix login page"
        );
    }

    #[test]
    fn parses_line_with_multi_word_summary() {
        let rec = LogRecord::parse_line("END,  0,   2024-03-05 10:00:07   OPS-3.  meeting Weekly sync call\n")
            .expect("valid line");
        assert_eq!(rec.action, Action::End);
        assert_eq!(rec.countdown_minutes, 0);
        assert_eq!(rec.timestamp, ts("2024-03-05 10:00:07"));
        assert_eq!(rec.code, "OPS-3");
        assert_eq!(rec.option, "meeting");
        assert_eq!(rec.summary, "Weekly sync call");
    }

    #[test]
    fn rejects_foreign_lines() {
        assert!(LogRecord::parse_line("").is_none());
        assert!(LogRecord::parse_line("timestamp,kind,position").is_none());
        assert!(LogRecord::parse_line("BEGIN,  x,   2024-03-05 10:00:07   A.  b c").is_none());
    }

    #[test]
    fn multi_word_option_survives_round_trip() {
        let known = vec!["code".to_string(), "code review".to_string(), "dev".to_string()];
        let task = Task::new("ABC-1", "code review", "Parser");
        let rec = LogRecord::new(Action::Begin, 25, &task, ts("2024-03-05 09:15:00"));

        let parsed = LogRecord::parse_line_with(&rec.to_line(), &known).expect("valid line");
        assert_eq!(parsed, rec);

        let short = Task::new("ABC-1", "code", "Parser");
        let rec = LogRecord::new(Action::End, 0, &short, ts("2024-03-05 09:40:00"));
        let parsed = LogRecord::parse_line_with(&rec.to_line(), &known).expect("valid line");
        assert_eq!(parsed.option, "code");
        assert_eq!(parsed.summary, "Parser");
    }

    #[test]
    fn option_with_empty_summary() {
        let known = vec!["code review".to_string()];
        let task = Task::new("ABC-1", "code review", "");
        let rec = LogRecord::new(Action::End, 0, &task, ts("2024-03-05 09:40:00"));

        let parsed = LogRecord::parse_line_with(rec.to_line().trim_end(), &known).unwrap();
        assert_eq!(parsed.option, "code review");
        assert_eq!(parsed.summary, "");
    }
}
