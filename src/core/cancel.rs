use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::{Arc, Mutex};

/// One-shot cancellation signal shared between the controller and a
/// countdown worker.
///
/// Cancelling drops the only sender, so every `recv` on [`receiver`]
/// returns immediately with a disconnection. Cancelling again is a no-op.
///
/// [`receiver`]: CancelToken::receiver
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<Mutex<Option<Sender<()>>>>,
    receiver: Receiver<()>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            sender: Arc::new(Mutex::new(Some(tx))),
            receiver: rx,
        }
    }

    /// Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        let mut guard = self.sender.lock().unwrap_or_else(|e| e.into_inner());
        guard.take().is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }

    /// Channel that becomes ready (disconnected) once cancelled; use it in `select!`.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancel_is_idempotent() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.is_cancelled());
    }

    #[test]
    fn clones_observe_cancellation() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let handle = std::thread::spawn(move || waiter.receiver().recv().is_err());
        token.cancel();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn receiver_blocks_until_cancelled() {
        let token = CancelToken::new();
        assert!(
            token
                .receiver()
                .recv_timeout(Duration::from_millis(20))
                .is_err()
        );
        assert!(!token.is_cancelled());
    }
}
