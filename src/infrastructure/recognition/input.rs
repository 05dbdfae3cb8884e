//! Shared operator line input

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, Mutex};

type LineReceiver = mpsc::UnboundedReceiver<io::Result<String>>;

/// Line source shared by the server prompt and the emulated recognizer.
///
/// Clones read from the same underlying stream, so a line consumed by one
/// reader is never seen by another.
#[derive(Clone)]
pub struct LineInput {
    lines: Arc<Mutex<LineReceiver>>,
}

impl LineInput {
    /// Read from the process's standard input.
    ///
    /// Reads happen on a dedicated thread; a blocking stdin read cannot be
    /// cancelled and would otherwise hold up runtime shutdown.
    pub fn from_stdin() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if sender.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self::from_receiver(receiver)
    }

    /// Read from any buffered async reader. Must be called inside a runtime.
    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if sender.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = sender.send(Err(e));
                        break;
                    }
                }
            }
        });
        Self::from_receiver(receiver)
    }

    fn from_receiver(receiver: LineReceiver) -> Self {
        Self {
            lines: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    ///
    /// Cancel-safe: dropping the future never loses a line.
    pub async fn next_line(&self) -> io::Result<Option<String>> {
        self.lines.lock().await.recv().await.transpose()
    }
}
