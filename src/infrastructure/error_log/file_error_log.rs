use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::application::ports::{ErrorLog, ErrorLogEntry, ErrorLogError};

/// Appends rendered entries to a plain-text file.
///
/// Each entry is written with one `write_all` on an append-mode handle
/// while holding `write_lock`, so entries from concurrent requests never
/// interleave. The lock is only held for the write itself.
pub struct FileErrorLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ErrorLog for FileErrorLog {
    async fn append(&self, entry: &ErrorLogEntry) -> Result<(), ErrorLogError> {
        let rendered = entry.render();

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(rendered.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
