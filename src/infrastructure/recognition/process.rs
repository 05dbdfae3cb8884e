//! External speech-recognition process adapter

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::ports::{RecognitionSink, Recognizer, RecognizerError};
use crate::domain::recognition::RecognitionResult;

/// One stdout line from the recognition engine
#[derive(Debug, Deserialize)]
struct EngineLine {
    text: String,
    confidence: f32,
    #[serde(default)]
    rejected: bool,
}

impl From<EngineLine> for RecognitionResult {
    fn from(line: EngineLine) -> Self {
        if line.rejected {
            RecognitionResult::rejected(line.text, line.confidence)
        } else {
            RecognitionResult::recognized(line.text, line.confidence)
        }
    }
}

/// Engine invocation settings
#[derive(Debug, Clone)]
pub struct ProcessRecognizerSettings {
    pub command: String,
    pub language: String,
    pub grammar_file: PathBuf,
}

/// Drives an external engine emitting one JSON result per stdout line
pub struct ProcessRecognizer {
    settings: ProcessRecognizerSettings,
    child: Option<Child>,
    reader: Option<JoinHandle<()>>,
}

impl ProcessRecognizer {
    pub fn new(settings: ProcessRecognizerSettings) -> Self {
        Self {
            settings,
            child: None,
            reader: None,
        }
    }

    fn build_args(&self) -> Vec<String> {
        vec![
            "--language".to_string(),
            self.settings.language.clone(),
            "--grammar".to_string(),
            self.settings.grammar_file.to_string_lossy().to_string(),
        ]
    }

    fn parse_line(line: &str) -> Result<RecognitionResult, serde_json::Error> {
        serde_json::from_str::<EngineLine>(line).map(RecognitionResult::from)
    }
}

#[async_trait]
impl Recognizer for ProcessRecognizer {
    async fn start(&mut self, sink: RecognitionSink) -> Result<(), RecognizerError> {
        if self.child.is_some() {
            return Err(RecognizerError::AlreadyStarted);
        }

        let grammar = &self.settings.grammar_file;
        if !grammar.is_file() {
            return Err(RecognizerError::GrammarNotFound(
                grammar.display().to_string(),
            ));
        }

        let mut child = Command::new(&self.settings.command)
            .args(self.build_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecognizerError::NotFound(self.settings.command.clone())
                } else {
                    RecognizerError::StartFailed(e.to_string())
                }
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            RecognizerError::StartFailed("Recognizer stdout unavailable".to_string())
        })?;

        debug!(
            command = %self.settings.command,
            language = %self.settings.language,
            grammar = %grammar.display(),
            "Recognizer started"
        );

        self.reader = Some(tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => match Self::parse_line(&line) {
                        Ok(result) => {
                            if sink.send(result).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(line = %line, error = %e, "Ignoring unreadable recognizer output")
                        }
                    },
                    Ok(None) => {
                        debug!("Recognizer output closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read recognizer output");
                        break;
                    }
                }
            }
        }));
        self.child = Some(child);

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), RecognizerError> {
        if let Some(reader) = self.reader.take() {
            reader.abort();
            let _ = reader.await;
        }

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let exited = child
            .try_wait()
            .map_err(|e| RecognizerError::StopFailed(e.to_string()))?;
        if exited.is_none() {
            child
                .kill()
                .await
                .map_err(|e| RecognizerError::StopFailed(e.to_string()))?;
        }

        debug!("Recognizer stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn settings(command: &str, grammar_file: PathBuf) -> ProcessRecognizerSettings {
        ProcessRecognizerSettings {
            command: command.to_string(),
            language: "en-US".to_string(),
            grammar_file,
        }
    }

    fn grammar(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("grammar.xml");
        std::fs::write(&path, "<grammar/>").unwrap();
        path
    }

    #[test]
    fn parse_recognized_line() {
        let result =
            ProcessRecognizer::parse_line(r#"{"text":"spawn zombie","confidence":0.92}"#).unwrap();
        assert_eq!(result, RecognitionResult::recognized("spawn zombie", 0.92));
    }

    #[test]
    fn parse_rejected_line() {
        let result = ProcessRecognizer::parse_line(
            r#"{"text":"mumble","confidence":0.31,"rejected":true}"#,
        )
        .unwrap();
        assert_eq!(result, RecognitionResult::rejected("mumble", 0.31));
    }

    #[test]
    fn parse_rejects_missing_confidence() {
        assert!(ProcessRecognizer::parse_line(r#"{"text":"spawn"}"#).is_err());
    }

    #[test]
    fn args_carry_language_and_grammar() {
        let recognizer = ProcessRecognizer::new(settings("engine", PathBuf::from("g.xml")));
        assert_eq!(
            recognizer.build_args(),
            vec!["--language", "en-US", "--grammar", "g.xml"]
        );
    }

    #[tokio::test]
    async fn missing_grammar_fails_start() {
        let dir = TempDir::new().unwrap();
        let mut recognizer =
            ProcessRecognizer::new(settings("engine", dir.path().join("absent.xml")));
        let (sink, _results) = mpsc::unbounded_channel();

        let err = recognizer.start(sink).await.unwrap_err();
        assert!(matches!(err, RecognizerError::GrammarNotFound(_)));
    }

    #[tokio::test]
    async fn missing_executable_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut recognizer =
            ProcessRecognizer::new(settings("voxrelay-no-such-engine", grammar(&dir)));
        let (sink, _results) = mpsc::unbounded_channel();

        let err = recognizer.start(sink).await.unwrap_err();
        assert!(matches!(err, RecognizerError::NotFound(_)));
        recognizer.stop().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reads_results_from_engine_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("engine.sh");
        std::fs::write(
            &script,
            concat!(
                "#!/bin/sh\n",
                "echo '{\"text\":\"hello\",\"confidence\":0.9}'\n",
                "echo 'garbage'\n",
                "echo '{\"text\":\"maybe\",\"confidence\":0.4,\"rejected\":true}'\n",
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut recognizer =
            ProcessRecognizer::new(settings(&script.to_string_lossy(), grammar(&dir)));
        let (sink, mut results) = mpsc::unbounded_channel();
        recognizer.start(sink).await.unwrap();

        assert_eq!(
            results.recv().await.unwrap(),
            RecognitionResult::recognized("hello", 0.9)
        );
        assert_eq!(
            results.recv().await.unwrap(),
            RecognitionResult::rejected("maybe", 0.4)
        );
        assert!(results.recv().await.is_none());

        recognizer.stop().await.unwrap();
        recognizer.stop().await.unwrap();
    }
}
