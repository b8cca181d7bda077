//! Resolved configuration model

use docstore_core::{
    Error, Result, SetPolicy, DEFAULT_BIND_HOST, DEFAULT_DATA_DIR, DEFAULT_LOG_FILE, DEFAULT_PORT,
    MERGE_INCLUDE_PATTERN,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the store and its transports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one file per document
    pub data_dir: PathBuf,
    /// Audit log location; relative paths resolve against `data_dir`
    pub log_file: PathBuf,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Behaviour of `set` for keys not yet in the document
    pub set_policy: SetPolicy,
    /// Serialize read-modify-write cycles per document
    pub lock_documents: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            bind_addr: SocketAddr::from((DEFAULT_BIND_HOST, DEFAULT_PORT)),
            set_policy: SetPolicy::default(),
            lock_documents: false,
        }
    }
}

impl Config {
    /// Full path of the audit log
    pub fn log_path(&self) -> PathBuf {
        if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            self.data_dir.join(&self.log_file)
        }
    }

    /// Reject configurations the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::configuration("data_dir must not be empty"));
        }

        let Some(log_name) = self.log_file.file_name() else {
            return Err(Error::configuration("log_file must name a file"));
        };

        // The log would otherwise be picked up by merges
        if log_name.to_string_lossy().contains(MERGE_INCLUDE_PATTERN) {
            return Err(Error::configuration(format!(
                "log_file '{}' must not contain '{MERGE_INCLUDE_PATTERN}'",
                self.log_file.display()
            )));
        }

        Ok(())
    }
}
