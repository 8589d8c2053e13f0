use std::error::Error;
use std::fmt::Write as _;
use std::io;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

const FRAME_CONTINUATION: &str = "\n       ";
const MESSAGE_CONTINUATION: &str = "\n    ";

/// Durable record of one failed analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogEntry {
    pub timestamp: DateTime<Utc>,
    pub request_id: Option<String>,
    pub message: String,
    pub trace: String,
}

impl ErrorLogEntry {
    /// Builds an entry whose trace is the error followed by its `source()`
    /// chain, one frame per line.
    pub fn from_error(
        error: &(dyn Error + 'static),
        request_id: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut trace = String::new();
        let mut current: Option<&(dyn Error + 'static)> = Some(error);
        let mut depth = 0;
        while let Some(err) = current {
            if depth > 0 {
                trace.push('\n');
            }
            let _ = write!(
                trace,
                "    {depth}: {}",
                continuation_lines(&err.to_string(), FRAME_CONTINUATION)
            );
            current = err.source();
            depth += 1;
        }

        Self {
            timestamp,
            request_id,
            message: error.to_string(),
            trace,
        }
    }

    /// Plain-text block terminated by a blank line. Blank lines inside the
    /// message or trace are dropped so the terminator stays unambiguous.
    pub fn render(&self) -> String {
        let mut out = format!(
            "[{}] Error: {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            continuation_lines(&self.message, MESSAGE_CONTINUATION)
        );
        if let Some(request_id) = &self.request_id {
            let _ = writeln!(out, "Request: {request_id}");
        }
        out.push_str("Stack:\n");
        for line in self.trace.lines().filter(|line| !line.trim().is_empty()) {
            let _ = writeln!(out, "{line}");
        }
        out.push('\n');
        out
    }
}

fn continuation_lines(text: &str, separator: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Append-only sink for failures. One `append` call must land as one
/// uninterleaved entry.
#[async_trait]
pub trait ErrorLog: Send + Sync {
    async fn append(&self, entry: &ErrorLogEntry) -> Result<(), ErrorLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorLogError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}
