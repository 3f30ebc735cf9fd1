//! Append-only JSONL log of collaborator traffic.
//!
//! The engine keeps no state between calls, so one conversation usually
//! spans several process runs. The log is therefore opened in append mode
//! and every call adds its events to the same file.

use interview_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One line of the log: event fields plus `type` and `timestamp`.
#[derive(Serialize)]
struct Record<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    timestamp: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'a> Record<'a> {
    fn from_event(event: &'a ConversationEvent) -> Self {
        let fields = match &event.payload {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => Map::from_iter([("payload".to_string(), other.clone())]),
        };
        Self {
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            fields,
        }
    }
}

/// [`ConversationLogger`] writing one JSON object per line.
pub struct JsonlConversationLogger {
    out: Mutex<LineWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: Mutex::new(LineWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&Record::from_event(&event)) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_events_are_flattened_into_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conv.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "generation_raw",
            json!({ "conversation_id": "conv-1", "text": "Tell me about your traction." }),
        ));
        logger.log(ConversationEvent::new(
            "scoring_result",
            json!({ "conversation_id": "conv-1", "score": 72.0, "summary": "Promising" }),
        ));

        // Lines are flushed as they are written; no drop needed
        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "generation_raw");
        assert_eq!(lines[0]["text"], "Tell me about your traction.");
        assert_eq!(lines[1]["type"], "scoring_result");
        assert_eq!(lines[1]["score"], 72.0);
        assert!(
            chrono::DateTime::parse_from_rfc3339(lines[1]["timestamp"].as_str().unwrap()).is_ok()
        );
    }

    #[test]
    fn test_later_calls_append_to_the_same_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conv.jsonl");

        for turn in 0..2 {
            let logger = JsonlConversationLogger::open(&path).unwrap();
            logger.log(ConversationEvent::new("interview_prompt", json!({ "turn": turn })));
        }

        let turns: Vec<_> = read_lines(&path).iter().map(|v| v["turn"].clone()).collect();
        assert_eq!(turns, vec![json!(0), json!(1)]);
    }

    #[test]
    fn test_scalar_payload_is_kept_under_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conv.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("reply_corrected", json!("forced question")));

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "reply_corrected");
        assert_eq!(lines[0]["payload"], "forced question");
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("run.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        assert_eq!(logger.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        File::create(&blocker).unwrap();

        assert!(JsonlConversationLogger::open(blocker.join("run.jsonl")).is_err());
    }
}
