//! Append-only audit log
//!
//! Every store operation produces exactly one line of the form
//! `<message>, <unix-millis>`. Lines go to an injected [`AuditSink`], so the
//! log file and an in-memory buffer are interchangeable.

mod sink;

pub use sink::{AuditSink, FileAuditSink, MemoryAuditSink};

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// One audit line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub timestamp_ms: i64,
}

impl LogEntry {
    /// Stamp a message with the current wall-clock time
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }

    /// The line as written to the sink, newline included
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.message, self.timestamp_ms)
    }
}

/// Stamps messages and hands them to the configured sink
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Append one entry; sink failures are reported but never propagated
    pub async fn record(&self, message: impl Into<String>) {
        let entry = LogEntry::now(message);
        if let Err(e) = self.sink.append(&entry.to_line()).await {
            warn!(error = %e, message = %entry.message, "failed to append audit entry");
        }
    }
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger").finish_non_exhaustive()
    }
}
