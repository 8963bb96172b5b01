//! Session controller: owns the single active task, its countdown and the
//! notification that follows an expired countdown.
//!
//! Transitions are serialized by one mutex around the active-session slot.
//! `start` and `stop` cancel the previous session and join its worker before
//! returning, so every BEGIN is closed by exactly one END before the next
//! BEGIN is written.

use crate::config::Config;
use crate::core::cancel::CancelToken;
use crate::core::notify::Notifier;
use crate::core::observer::{SessionObserver, UiEvent};
use crate::core::tracking::EventLogger;
use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::record::LogRecord;
use crate::models::task::Task;
use chrono::{DateTime, Local};
use crossbeam_channel::{after, never, select};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Length of one countdown minute and the notification ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub minute: Duration,
    pub notification_ceiling: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            minute: Duration::from_secs(60),
            notification_ceiling: Duration::from_secs(3 * 60),
        }
    }
}

impl Timings {
    /// `None` for a zero-minute countdown.
    pub fn countdown(&self, minutes: u32) -> Option<Duration> {
        (minutes > 0).then(|| self.minute * minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running {
        task: Task,
        deadline: Option<DateTime<Local>>,
    },
    Notifying {
        task: Task,
        pid: u32,
    },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// Task being timed; `None` once the session has ended.
    pub fn running_task(&self) -> Option<&Task> {
        match self {
            SessionState::Running { task, .. } => Some(task),
            _ => None,
        }
    }
}

/// What the worker thread needs; shared with the controller.
struct Shared {
    logger: EventLogger,
    notifier: Notifier,
    observer: Arc<dyn SessionObserver>,
    timings: Timings,
    state: Mutex<SessionState>,
}

impl Shared {
    fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    fn emit(&self, event: UiEvent) {
        self.observer.on_event(event);
    }

    fn warn(&self, message: String) {
        warn!("{message}");
        self.emit(UiEvent::Warning(message));
    }

    /// Write a record; failures become warnings.
    fn log(&self, action: Action, minutes: u32, task: &Task) {
        let record = LogRecord::now(action, minutes, task);
        if let Err(e) = self.logger.record(&record) {
            self.warn(format!("{action} record for {} not written: {e}", task.code));
        }
    }

    fn end_session(&self, task: &Task, minutes: u32, expired: bool) {
        self.log(Action::End, minutes, task);
        self.set_state(SessionState::Idle);
        self.emit(UiEvent::StartEnabled {
            code: task.code.clone(),
            enabled: true,
        });
        self.emit(UiEvent::SessionEnded {
            code: task.code.clone(),
            expired,
        });
    }

    /// Launch the notification and keep it alive until cancelled or the ceiling.
    fn notify(&self, task: &Task, cancel: &CancelToken) {
        let process = match self.notifier.launch() {
            Ok(Some(p)) => p,
            Ok(None) => {
                debug!("no notification command configured");
                self.emit(UiEvent::StopEnabled(false));
                return;
            }
            Err(e) => {
                self.warn(e.to_string());
                self.emit(UiEvent::StopEnabled(false));
                return;
            }
        };

        let pid = process.id();
        self.set_state(SessionState::Notifying {
            task: task.clone(),
            pid,
        });
        self.emit(UiEvent::NotificationStarted { pid });

        let timed_out = select! {
            recv(cancel.receiver()) -> _ => {
                info!(pid, "notification stopped");
                false
            }
            recv(after(self.timings.notification_ceiling)) -> _ => {
                info!(pid, "notification timeout");
                true
            }
        };

        if let Err(e) = process.kill() {
            self.warn(e.to_string());
        }

        self.set_state(SessionState::Idle);
        self.emit(UiEvent::NotificationStopped { timed_out });
        if timed_out {
            self.emit(UiEvent::StopEnabled(false));
        }
    }
}

fn run_countdown(shared: Arc<Shared>, task: Task, minutes: u32, cancel: CancelToken) {
    let expiry = match shared.timings.countdown(minutes) {
        Some(d) => {
            info!(code = %task.code, minutes, "beginning countdown");
            after(d)
        }
        None => never(),
    };

    select! {
        recv(cancel.receiver()) -> _ => {
            info!(code = %task.code, "countdown interrupted");
            shared.end_session(&task, minutes, false);
        }
        recv(expiry) -> _ => {
            info!(code = %task.code, "countdown expired");
            shared.end_session(&task, minutes, true);
            shared.notify(&task, &cancel);
        }
    }
}

struct ActiveSession {
    task: Task,
    cancel: CancelToken,
    worker: JoinHandle<()>,
}

pub struct SessionManager {
    shared: Arc<Shared>,
    countdown: AtomicU32,
    slot: Mutex<Option<ActiveSession>>,
}

impl SessionManager {
    pub fn new(
        logger: EventLogger,
        notifier: Notifier,
        observer: Arc<dyn SessionObserver>,
        timings: Timings,
        countdown_minutes: u32,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                logger,
                notifier,
                observer,
                timings,
                state: Mutex::new(SessionState::Idle),
            }),
            countdown: AtomicU32::new(countdown_minutes),
            slot: Mutex::new(None),
        }
    }

    pub fn from_config(cfg: &Config, observer: Arc<dyn SessionObserver>, timings: Timings) -> Self {
        Self::new(
            EventLogger::new(cfg.tracking_dir()).with_options(cfg.known_options()),
            Notifier::new(&cfg.music_command),
            observer,
            timings,
            cfg.countdown_default,
        )
    }

    pub fn logger(&self) -> &EventLogger {
        &self.shared.logger
    }

    /// Countdown (minutes) applied to the next `start`.
    pub fn countdown(&self) -> u32 {
        self.countdown.load(Ordering::SeqCst)
    }

    pub fn set_countdown(&self, minutes: u32) {
        debug!(minutes, "countdown set");
        self.countdown.store(minutes, Ordering::SeqCst);
    }

    pub fn state(&self) -> SessionState {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Begin timing `task`, ending the previous session first.
    pub fn start(&self, task: Task) -> AppResult<()> {
        let mut slot = self.lock_slot()?;

        if let Some(prev) = slot.take() {
            debug!(code = %prev.task.code, "replacing active session");
            self.finish(prev);
        }

        let minutes = self.countdown();
        let shared = &self.shared;

        shared.log(Action::Begin, minutes, &task);

        let deadline = shared
            .timings
            .countdown(minutes)
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Local::now() + d);
        shared.set_state(SessionState::Running {
            task: task.clone(),
            deadline,
        });

        // Controls are updated before the worker exists, so its re-enable
        // can never be overtaken by this disable.
        shared.emit(UiEvent::SessionBegan {
            code: task.code.clone(),
            countdown_minutes: minutes,
        });
        shared.emit(UiEvent::StopEnabled(true));
        shared.emit(UiEvent::StartEnabled {
            code: task.code.clone(),
            enabled: false,
        });

        let cancel = CancelToken::new();
        let spawned = {
            let shared = Arc::clone(shared);
            let task = task.clone();
            let cancel = cancel.clone();
            thread::Builder::new()
                .name("goltime-countdown".into())
                .spawn(move || run_countdown(shared, task, minutes, cancel))
        };

        let worker = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                shared.end_session(&task, minutes, false);
                shared.emit(UiEvent::StopEnabled(false));
                return Err(e.into());
            }
        };

        *slot = Some(ActiveSession {
            task,
            cancel,
            worker,
        });
        Ok(())
    }

    /// End the current session or silence the notification. No-op when idle.
    pub fn stop(&self) -> AppResult<()> {
        let mut slot = self.lock_slot()?;
        if let Some(prev) = slot.take() {
            self.finish(prev);
        }
        self.shared.emit(UiEvent::StopEnabled(false));
        Ok(())
    }

    /// Same cancellation as [`stop`](Self::stop); the caller exits afterwards.
    pub fn shutdown(&self) -> AppResult<()> {
        info!("shutting down session controller");
        self.stop()
    }

    fn finish(&self, session: ActiveSession) {
        session.cancel.cancel();
        if session.worker.join().is_err() {
            self.shared
                .warn(format!("countdown worker for {} panicked", session.task.code));
            self.shared.set_state(SessionState::Idle);
        }
    }

    fn lock_slot(&self) -> AppResult<MutexGuard<'_, Option<ActiveSession>>> {
        self.slot
            .lock()
            .map_err(|e| AppError::Other(format!("session lock poisoned: {e}")))
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = slot.take() {
            session.cancel.cancel();
            let _ = session.worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::NoopObserver;

    fn manager(dir: &std::path::Path, countdown: u32) -> SessionManager {
        SessionManager::new(
            EventLogger::new(dir),
            Notifier::default(),
            Arc::new(NoopObserver),
            Timings {
                minute: Duration::from_millis(20),
                notification_ceiling: Duration::from_millis(50),
            },
            countdown,
        )
    }

    #[test]
    fn countdown_zero_has_no_duration() {
        let t = Timings::default();
        assert_eq!(t.countdown(0), None);
        assert_eq!(t.countdown(25), Some(Duration::from_secs(1500)));
    }

    #[test]
    fn start_records_running_state_with_deadline() {
        let tmp = tempfile::tempdir().unwrap();
        let m = manager(tmp.path(), 1000);
        m.start(Task::new("A-1", "dev", "x")).unwrap();

        match m.state() {
            SessionState::Running { task, deadline } => {
                assert_eq!(task.code, "A-1");
                assert!(deadline.is_some());
            }
            other => panic!("unexpected state {other:?}"),
        }

        m.stop().unwrap();
        assert!(m.state().is_idle());
    }

    #[test]
    fn zero_countdown_has_no_deadline() {
        let tmp = tempfile::tempdir().unwrap();
        let m = manager(tmp.path(), 0);
        m.start(Task::new("A-1", "dev", "x")).unwrap();
        assert!(matches!(m.state(), SessionState::Running { deadline: None, .. }));
        m.stop().unwrap();
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let m = manager(tmp.path(), 0);
        m.stop().unwrap();
        m.stop().unwrap();
        assert!(m.state().is_idle());
    }

    #[test]
    fn set_countdown_applies_to_next_start() {
        let tmp = tempfile::tempdir().unwrap();
        let m = manager(tmp.path(), 0);
        m.set_countdown(45);
        assert_eq!(m.countdown(), 45);
    }
}
