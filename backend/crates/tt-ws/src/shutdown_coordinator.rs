use crate::ShutdownGuard;

use tokio::sync::watch;

/// Process-wide shutdown switch shared by the HTTP server and every WebSocket loop.
///
/// Once flipped it stays flipped; guards created afterwards see it immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    state: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        let already = self.state.send_replace(true);
        if !already {
            log::info!(
                "Shutdown signal received, closing {} WebSocket loop(s)",
                self.state.receiver_count()
            );
        }
    }

    /// True once `shutdown` has been called
    pub fn is_shutting_down(&self) -> bool {
        *self.state.borrow()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.state.subscribe())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
