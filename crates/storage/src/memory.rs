//! In-memory backend for tests and embedding

use crate::StorageBackend;
use async_trait::async_trait;
use docstore_core::{validate_document_name, Error, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Documents held in a shared map; clones see the same documents
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without going through name validation
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.documents.write().insert(name.into(), bytes.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.read().contains_key(name)
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read_document(&self, name: &str) -> Result<Vec<u8>> {
        validate_document_name(name)?;
        self.documents
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::file_not_found(name))
    }

    async fn write_document(&self, name: &str, bytes: &[u8]) -> Result<()> {
        validate_document_name(name)?;
        self.documents
            .write()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn delete_document(&self, name: &str) -> Result<()> {
        validate_document_name(name)?;
        self.documents
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::file_not_found(name))
    }

    async fn list_documents(&self) -> Result<Vec<String>> {
        Ok(self.documents.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore_core::ErrorKind;

    #[tokio::test]
    async fn test_memory_backend_lifecycle() {
        let backend = MemoryBackend::new();
        backend.write_document("b.json", b"{}").await.unwrap();
        backend.insert("a.json", "{\"x\":1}");

        assert_eq!(backend.list_documents().await.unwrap(), vec!["a.json", "b.json"]);
        assert_eq!(backend.read_document("a.json").await.unwrap(), b"{\"x\":1}".to_vec());

        backend.delete_document("a.json").await.unwrap();
        assert!(!backend.contains("a.json"));
        assert_eq!(
            backend.delete_document("a.json").await.unwrap_err().kind(),
            ErrorKind::FileNotFound
        );
        assert_eq!(
            backend.read_document("a.json").await.unwrap_err().kind(),
            ErrorKind::FileNotFound
        );
    }

    #[tokio::test]
    async fn test_clones_share_documents() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        clone.write_document("shared.json", b"{}").await.unwrap();
        assert!(backend.contains("shared.json"));
    }
}
