//! Key-level access to individual documents

use crate::locks::{DocumentGuard, DocumentLocks};
use docstore_core::{
    is_invalid_value, parse_document, render_document, require_non_empty,
    validate_document_name, Document, Error, Result, SetPolicy,
};
use docstore_storage::StorageBackend;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Read and parse one document
pub(crate) async fn load_document(backend: &dyn StorageBackend, name: &str) -> Result<Document> {
    let bytes = backend.read_document(name).await?;
    parse_document(name, &bytes)
}

/// Render a value the way `get` returns it: strings bare, whole floats
/// without a fractional part, everything else as JSON
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Document lifecycle and key operations over a [`StorageBackend`]
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    policy: SetPolicy,
    locks: Option<DocumentLocks>,
}

impl DocumentStore {
    /// Permissive `set`, no locking
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            policy: SetPolicy::default(),
            locks: None,
        }
    }

    pub fn with_set_policy(mut self, policy: SetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Serialize read-modify-write cycles on the same document
    pub fn with_document_locks(mut self, locks: DocumentLocks) -> Self {
        self.locks = Some(locks);
        self
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    async fn lock(&self, name: &str) -> Option<DocumentGuard> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(name).await),
            None => None,
        }
    }

    async fn store(&self, name: &str, document: &Document) -> Result<()> {
        self.backend
            .write_document(name, render_document(document).as_bytes())
            .await
    }

    /// Read and parse a whole document
    pub async fn read(&self, name: &str) -> Result<Document> {
        validate_document_name(name)?;
        load_document(self.backend.as_ref(), name).await
    }

    /// The value at `key`, or the whole document when `key` is absent or empty
    pub async fn get(&self, name: &str, key: Option<&str>) -> Result<String> {
        let document = self.read(name).await?;

        match key.filter(|k| !k.is_empty()) {
            None => Ok(render_document(&document)),
            Some(key) => {
                let value = document.get(key);
                if is_invalid_value(value) {
                    return Err(Error::invalid_key(key));
                }
                Ok(value.map(value_text).unwrap_or_default())
            }
        }
    }

    /// Store `value` as a string under `key`
    pub async fn set(&self, name: &str, key: &str, value: &str) -> Result<()> {
        validate_document_name(name)?;
        require_non_empty("key", key)?;
        require_non_empty("value", value)?;

        let _guard = self.lock(name).await;
        let mut document = load_document(self.backend.as_ref(), name).await?;

        if self.policy == SetPolicy::Strict && !document.contains_key(key) {
            return Err(Error::invalid_key(key));
        }

        document.insert(key.to_string(), Value::String(value.to_string()));
        debug!(document = name, key, "setting key");
        self.store(name, &document).await
    }

    /// Delete `key`; fails when the key is absent or falsy
    pub async fn remove(&self, name: &str, key: &str) -> Result<()> {
        validate_document_name(name)?;
        require_non_empty("key", key)?;

        let _guard = self.lock(name).await;
        let mut document = load_document(self.backend.as_ref(), name).await?;

        if is_invalid_value(document.get(key)) {
            return Err(Error::invalid_key(key));
        }

        document.shift_remove(key);
        debug!(document = name, key, "removing key");
        self.store(name, &document).await
    }

    /// Create a document, `{}` when no content is given
    pub async fn create_file(&self, name: &str, content: Option<Document>) -> Result<()> {
        validate_document_name(name)?;

        let _guard = self.lock(name).await;
        let existing = self.backend.list_documents().await?;
        if existing.iter().any(|candidate| candidate == name) {
            return Err(Error::file_already_exists(name));
        }

        debug!(document = name, "creating document");
        self.store(name, &content.unwrap_or_default()).await
    }

    /// Delete a document
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        validate_document_name(name)?;

        let _guard = self.lock(name).await;
        debug!(document = name, "deleting document");
        self.backend.delete_document(name).await
    }
}
