//! Single-shot stop signal for a relay session

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable handle that stops a relay session.
///
/// Once stopped it stays stopped; every waiter is released.
#[derive(Debug, Clone)]
pub struct StopHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Create a handle in the running state
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Request a stop. Returns true only for the call that flipped the signal.
    pub fn stop(&self) -> bool {
        !self.sender.send_replace(true)
    }

    /// Check if a stop was requested
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }

    /// Wait until a stop is requested
    pub async fn stopped(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail
        let _ = receiver.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}
