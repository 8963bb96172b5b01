//! Interface between the session controller and whatever draws the controls.

/// State changes pushed by the controller.
///
/// Events may arrive from the countdown worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Enable/disable the start control of one task.
    StartEnabled { code: String, enabled: bool },
    /// Enable/disable the global stop control.
    StopEnabled(bool),
    SessionBegan { code: String, countdown_minutes: u32 },
    SessionEnded { code: String, expired: bool },
    NotificationStarted { pid: u32 },
    NotificationStopped { timed_out: bool },
    /// Non-fatal runtime failure (log write, process launch, ...).
    Warning(String),
}

/// Receives [`UiEvent`]s. Implementations must not call back into the
/// controller from `on_event`.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: UiEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_event(&self, _event: UiEvent) {}
}
