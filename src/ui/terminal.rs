//! Terminal rendition of the control surface: one row per task (start
//! control + category selector), a stop control and a countdown selector.

use crate::core::observer::{SessionObserver, UiEvent};
use crate::models::task::Task;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;
use ansi_term::Colour;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Enabled/disabled state of the controls, written by the observer.
#[derive(Debug, Default)]
pub struct Controls {
    disabled_starts: HashMap<String, bool>,
    stop_enabled: bool,
}

impl Controls {
    pub fn start_enabled(&self, code: &str) -> bool {
        !self.disabled_starts.get(code).copied().unwrap_or(false)
    }

    pub fn stop_enabled(&self) -> bool {
        self.stop_enabled
    }

    fn apply(&mut self, event: &UiEvent) {
        match event {
            UiEvent::StartEnabled { code, enabled } => {
                self.disabled_starts.insert(code.clone(), !enabled);
            }
            UiEvent::StopEnabled(enabled) => self.stop_enabled = *enabled,
            _ => {}
        }
    }
}

/// Prints controller events and keeps [`Controls`] current.
#[derive(Debug, Default, Clone)]
pub struct TerminalObserver {
    controls: Arc<Mutex<Controls>>,
}

impl TerminalObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_enabled(&self, code: &str) -> bool {
        self.lock().start_enabled(code)
    }

    pub fn stop_enabled(&self) -> bool {
        self.lock().stop_enabled()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Controls> {
        self.controls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionObserver for TerminalObserver {
    fn on_event(&self, event: UiEvent) {
        self.lock().apply(&event);

        match event {
            UiEvent::SessionBegan {
                code,
                countdown_minutes: 0,
            } => success(format!("{code} started (no countdown)")),
            UiEvent::SessionBegan {
                code,
                countdown_minutes,
            } => success(format!("{code} started, countdown {countdown_minutes} min")),
            UiEvent::SessionEnded { code, expired: true } => {
                info(format!("{code} ended: countdown expired"))
            }
            UiEvent::SessionEnded { code, .. } => info(format!("{code} ended")),
            UiEvent::NotificationStarted { pid } => {
                info(format!("notification running (pid {pid}), 'stop' to silence it"))
            }
            UiEvent::NotificationStopped { timed_out: true } => info("notification timed out"),
            UiEvent::NotificationStopped { .. } => info("notification stopped"),
            UiEvent::Warning(msg) => warning(msg),
            UiEvent::StartEnabled { .. } | UiEvent::StopEnabled(_) => {}
        }
    }
}

/// A task as shown on screen: the domain task plus its control state.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task: Task,
}

impl TaskRow {
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

/// The task list together with the shared control state.
pub struct TaskBoard {
    pub rows: Vec<TaskRow>,
    observer: TerminalObserver,
}

impl TaskBoard {
    pub fn new(tasks: &[Task], observer: TerminalObserver) -> Self {
        Self {
            rows: tasks.iter().cloned().map(TaskRow::new).collect(),
            observer,
        }
    }

    /// 1-based lookup, as typed by the operator.
    pub fn row(&self, n: usize) -> Option<&TaskRow> {
        n.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn row_mut(&mut self, n: usize) -> Option<&mut TaskRow> {
        n.checked_sub(1).and_then(|i| self.rows.get_mut(i))
    }

    pub fn start_enabled(&self, code: &str) -> bool {
        self.observer.start_enabled(code)
    }

    pub fn stop_enabled(&self) -> bool {
        self.observer.stop_enabled()
    }

    pub fn render(&self, countdown: u32) -> String {
        let mut table = Table::new(&["#", "Task", "Option", "Start"]);

        for (i, row) in self.rows.iter().enumerate() {
            let start = if self.start_enabled(&row.task.code) {
                Colour::Green.paint("ready").to_string()
            } else {
                Colour::Yellow.paint("running").to_string()
            };
            table.add_row(vec![
                (i + 1).to_string(),
                format!("{} {}", row.task.code, row.task.summary),
                row.task.option.clone(),
                start,
            ]);
        }

        let stop = if self.stop_enabled() { "enabled" } else { "disabled" };
        format!(
            "{}\nCountdown: {} min (0 => no countdown) | Stop: {}\n",
            table.render(),
            countdown,
            stop
        )
    }
}
