use tokio::sync::watch;

/// One task's view of the shutdown switch
pub struct ShutdownGuard {
    state: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub(crate) fn new(state: watch::Receiver<bool>) -> Self {
        Self { state }
    }

    /// Resolve once shutdown has been triggered, or when the coordinator is gone
    pub async fn wait(&mut self) {
        let _ = self.state.wait_for(|stopping| *stopping).await;
    }

    /// Non-blocking check
    pub fn is_triggered(&self) -> bool {
        *self.state.borrow()
    }
}
