//! Text-emulation recognizer for console mode

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::ports::{RecognitionSink, Recognizer, RecognizerError};
use crate::domain::recognition::{is_quit_utterance, RecognitionResult};

use super::input::LineInput;

/// Confidence reported for typed lines
const TYPED_CONFIDENCE: f32 = 1.0;

/// Treats each non-blank typed line as a recognized utterance.
///
/// The sink is dropped at end of input, which ends the session. Reading
/// stops after a quit utterance so later lines stay on the shared input.
pub struct EmulatedRecognizer {
    input: LineInput,
    reader: Option<JoinHandle<()>>,
}

impl EmulatedRecognizer {
    pub fn new(input: LineInput) -> Self {
        Self {
            input,
            reader: None,
        }
    }
}

#[async_trait]
impl Recognizer for EmulatedRecognizer {
    async fn start(&mut self, sink: RecognitionSink) -> Result<(), RecognizerError> {
        if self.reader.is_some() {
            return Err(RecognizerError::AlreadyStarted);
        }

        let input = self.input.clone();
        self.reader = Some(tokio::spawn(async move {
            loop {
                match input.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let quit = is_quit_utterance(&line);
                        if sink
                            .send(RecognitionResult::recognized(line, TYPED_CONFIDENCE))
                            .is_err()
                            || quit
                        {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("Operator input closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read operator input");
                        break;
                    }
                }
            }
        }));

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), RecognizerError> {
        if let Some(reader) = self.reader.take() {
            reader.abort();
            let _ = reader.await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::AsyncWriteExt;
    use tokio::sync::mpsc;

    fn input(text: &str) -> LineInput {
        LineInput::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }

    #[tokio::test]
    async fn typed_lines_become_results() {
        let mut recognizer = EmulatedRecognizer::new(input("Hello World\n\n  \nquit\n"));
        let (sink, mut results) = mpsc::unbounded_channel();

        recognizer.start(sink).await.unwrap();

        let first = results.recv().await.unwrap();
        assert_eq!(first, RecognitionResult::recognized("Hello World", 1.0));
        assert_eq!(results.recv().await.unwrap().text, "quit");
        assert!(results.recv().await.is_none());

        recognizer.stop().await.unwrap();
    }

    #[tokio::test]
    async fn lines_after_quit_stay_on_input() {
        let shared = input("stop the rain\nQuit\n7\n");
        let mut recognizer = EmulatedRecognizer::new(shared.clone());
        let (sink, mut results) = mpsc::unbounded_channel();

        recognizer.start(sink).await.unwrap();

        assert_eq!(results.recv().await.unwrap().text, "stop the rain");
        assert_eq!(results.recv().await.unwrap().text, "Quit");
        assert!(results.recv().await.is_none());
        recognizer.stop().await.unwrap();

        assert_eq!(shared.next_line().await.unwrap().as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn second_start_fails() {
        let mut recognizer = EmulatedRecognizer::new(input(""));
        let (sink, _results) = mpsc::unbounded_channel();

        recognizer.start(sink.clone()).await.unwrap();
        let err = recognizer.start(sink).await.unwrap_err();
        assert!(matches!(err, RecognizerError::AlreadyStarted));
    }

    #[tokio::test]
    async fn stop_is_idempotent_and_leaves_input() {
        let (reader, mut writer) = tokio::io::duplex(64);
        let shared = LineInput::from_reader(tokio::io::BufReader::new(reader));
        let mut recognizer = EmulatedRecognizer::new(shared.clone());
        let (sink, mut results) = mpsc::unbounded_channel();

        recognizer.start(sink).await.unwrap();
        recognizer.stop().await.unwrap();
        recognizer.stop().await.unwrap();
        assert!(results.recv().await.is_none());

        writer.write_all(b"3\n").await.unwrap();
        assert_eq!(shared.next_line().await.unwrap().as_deref(), Some("3"));
    }
}
