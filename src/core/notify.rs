//! External notification command launched when a countdown expires.

use crate::errors::{AppError, AppResult};
use std::io;
use std::process::{Child, Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    argv: Vec<String>,
}

impl Notifier {
    /// Split `command` on whitespace; no shell interpretation.
    pub fn new(command: &str) -> Self {
        Self {
            argv: command.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.argv.is_empty()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Spawn the command without waiting for it.
    ///
    /// Returns `Ok(None)` when no command is configured.
    pub fn launch(&self) -> AppResult<Option<NotificationProcess>> {
        let Some((program, args)) = self.argv.split_first() else {
            return Ok(None);
        };

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::Notification(format!("{program}: {e}")))?;

        debug!(pid = child.id(), program = %program, "notification launched");
        Ok(Some(NotificationProcess { child }))
    }
}

/// A running notification command.
#[derive(Debug)]
pub struct NotificationProcess {
    child: Child,
}

impl NotificationProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Terminate and reap the process. A child that already exited is fine.
    pub fn kill(mut self) -> AppResult<()> {
        if let Ok(Some(status)) = self.child.try_wait() {
            debug!(pid = self.child.id(), %status, "notification already exited");
            return Ok(());
        }

        match self.child.kill() {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(AppError::Notification(format!("kill failed: {e}"))),
        }

        self.child.wait()?;
        Ok(())
    }
}
