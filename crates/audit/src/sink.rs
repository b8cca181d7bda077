//! Audit sinks

use crate::LogEntry;
use async_trait::async_trait;
use docstore_core::{Error, Result};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Destination for audit lines
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one complete line; concurrent calls must not interleave
    async fn append(&self, line: &str) -> Result<()>;
}

/// Appends to a file, opened in append mode for every line
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::io(&self.path, "open audit log", e))?;

        // One write per line: O_APPEND keeps whole lines together
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::io(&self.path, "append audit log", e))?;
        file.flush()
            .await
            .map_err(|e| Error::io(&self.path, "flush audit log", e))?;
        Ok(())
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lines, newline included
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Lines parsed back into entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| {
                let line = line.strip_suffix('\n').unwrap_or(line);
                let (message, timestamp) = line.rsplit_once(", ")?;
                Some(LogEntry {
                    message: message.to_string(),
                    timestamp_ms: timestamp.parse().ok()?,
                })
            })
            .collect()
    }

    /// Just the messages, in append order
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
