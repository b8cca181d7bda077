//! Configuration loader for docstore
//!
//! Sources are applied in order, later ones winning: built-in defaults, an
//! optional JSON file, `DOCSTORE_*` environment variables, then values set
//! directly on the loader (typically from command-line flags).

use crate::config::Config;
use docstore_core::{
    Error, Result, SetPolicy, DOCSTORE_BIND_VAR, DOCSTORE_DATA_DIR_VAR, DOCSTORE_LOCK_DOCUMENTS_VAR,
    DOCSTORE_LOG_FILE_VAR, DOCSTORE_SET_POLICY_VAR,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::debug;

/// Builder that resolves a [`Config`]
#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    skip_env: bool,
    data_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
    bind_addr: Option<SocketAddr>,
    set_policy: Option<SetPolicy>,
    lock_documents: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON configuration file before applying the environment
    pub fn file(mut self, path: PathBuf) -> Self {
        self.file = Some(path);
        self
    }

    /// Ignore `DOCSTORE_*` environment variables
    pub fn skip_env(mut self, skip: bool) -> Self {
        self.skip_env = skip;
        self
    }

    pub fn data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = Some(dir);
        self
    }

    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    pub fn set_policy(mut self, policy: SetPolicy) -> Self {
        self.set_policy = Some(policy);
        self
    }

    pub fn lock_documents(mut self, lock: bool) -> Self {
        self.lock_documents = Some(lock);
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Config> {
        let mut config = match &self.file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                let text = std::fs::read_to_string(path)
                    .map_err(|e| Error::io(path, "read configuration", e))?;
                serde_json::from_str::<Config>(&text).map_err(|e| {
                    Error::configuration(format!("invalid config file '{}': {e}", path.display()))
                })?
            }
            None => Config::default(),
        };

        if !self.skip_env {
            apply_env(&mut config, |name| std::env::var(name).ok())?;
        }

        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(path) = self.log_file {
            config.log_file = path;
        }
        if let Some(addr) = self.bind_addr {
            config.bind_addr = addr;
        }
        if let Some(policy) = self.set_policy {
            config.set_policy = policy;
        }
        if let Some(lock) = self.lock_documents {
            config.lock_documents = lock;
        }

        config.validate()?;
        debug!(?config, "configuration resolved");
        Ok(config)
    }
}

/// Overlay environment variables read through `lookup`
pub(crate) fn apply_env(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(dir) = lookup(DOCSTORE_DATA_DIR_VAR) {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(path) = lookup(DOCSTORE_LOG_FILE_VAR) {
        config.log_file = PathBuf::from(path);
    }
    if let Some(addr) = lookup(DOCSTORE_BIND_VAR) {
        config.bind_addr = addr.parse().map_err(|e| {
            Error::configuration(format!("{DOCSTORE_BIND_VAR}='{addr}' is not a socket address: {e}"))
        })?;
    }
    if let Some(policy) = lookup(DOCSTORE_SET_POLICY_VAR) {
        config.set_policy = policy.parse()?;
    }
    if let Some(lock) = lookup(DOCSTORE_LOCK_DOCUMENTS_VAR) {
        config.lock_documents = parse_bool(DOCSTORE_LOCK_DOCUMENTS_VAR, &lock)?;
    }
    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::configuration(format!(
            "{name}='{value}' is not a boolean"
        ))),
    }
}
