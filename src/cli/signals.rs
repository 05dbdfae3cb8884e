//! Interrupt handling for relay sessions

use std::io;

use colored::Colorize;
use tokio::task::JoinHandle;

use crate::application::StopHandle;

/// Stops one session on Ctrl-C for as long as it is alive
pub struct InterruptGuard {
    task: JoinHandle<()>,
}

impl InterruptGuard {
    /// Signal `stop` on the next SIGINT
    pub fn stop_on_interrupt(stop: StopHandle) -> Self {
        let task = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("{} Received SIGINT (stopping)", "↓".cyan());
                stop.stop();
            }
        });
        Self { task }
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Wait for Ctrl-C outside of a session
pub async fn interrupted() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dropping_guard_leaves_session_running() {
        let stop = StopHandle::new();
        let guard = InterruptGuard::stop_on_interrupt(stop.clone());
        drop(guard);

        tokio::task::yield_now().await;
        assert!(!stop.is_stopped());
    }
}
