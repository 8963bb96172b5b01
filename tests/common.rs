#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use goltime::core::observer::{SessionObserver, UiEvent};
use goltime::models::record::LogRecord;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub fn glt() -> Command {
    cargo_bin_cmd!("goltime")
}

/// Write a configuration whose tracking directory lives under `dir`.
pub fn write_config(dir: &Path, countdown_default: u32, music: &str) -> PathBuf {
    let tracking = dir.join("tracking");
    let cfg = format!(
        r#"musicCommand: "{music}"
countdownOptions: [0, 1, 5, 25]
countdownDefault: {countdown_default}
options: [dev, review, meeting]
trackingDirectory: "{}"
tasks:
  - jiraCode: "ABC-1"
    defaultOption: "dev"
    summary: "Parser work"
  - jiraCode: "ABC-2"
    defaultOption: "meeting"
    summary: "Weekly sync"
"#,
        tracking.display()
    );
    let path = dir.join("goltime.yml");
    fs::write(&path, cfg).expect("write config");
    path
}

/// Every record of every tracking file in `dir`, in file-name then line order.
pub fn all_records(dir: &Path) -> Vec<LogRecord> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("tracking_") && n.ends_with(".csv"))
        })
        .collect();
    files.sort();

    files
        .iter()
        .flat_map(|f| {
            fs::read_to_string(f)
                .expect("read tracking file")
                .lines()
                .filter_map(LogRecord::parse_line)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// `ACTION CODE` pairs, handy for order assertions.
pub fn actions(records: &[LogRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| format!("{} {}", r.action, r.code))
        .collect()
}

/// Observer that keeps every event for later inspection.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&UiEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    pub fn position(&self, pred: impl Fn(&UiEvent) -> bool) -> Option<usize> {
        self.events().iter().position(pred)
    }
}

impl SessionObserver for RecordingObserver {
    fn on_event(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
