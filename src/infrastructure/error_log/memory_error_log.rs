use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{ErrorLog, ErrorLogEntry, ErrorLogError};

#[derive(Default)]
pub struct InMemoryErrorLog {
    entries: Mutex<Vec<ErrorLogEntry>>,
}

impl InMemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ErrorLog for InMemoryErrorLog {
    async fn append(&self, entry: &ErrorLogEntry) -> Result<(), ErrorLogError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ErrorLogError::Unavailable(e.to_string()))?;
        entries.push(entry.clone());
        Ok(())
    }
}
