//! File system backend: one file per document inside a root directory

use crate::StorageBackend;
use async_trait::async_trait;
use docstore_core::{validate_document_name, Error, Result};
use docstore_utils::{is_temp_file_name, write_atomic};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Stores each document as `<root>/<name>`
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Create a backend rooted at `root`, creating the directory if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| Error::io(&root, "create data directory", e))?;
        Ok(Self { root })
    }

    /// Directory holding the documents
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, name: &str) -> Result<PathBuf> {
        validate_document_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageBackend for FsBackend {
    async fn read_document(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.document_path(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::file_not_found(name)),
            Err(e) => Err(Error::io(path, "read", e)),
        }
    }

    async fn write_document(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.document_path(name)?;
        debug!(document = name, bytes = bytes.len(), "writing document");
        write_atomic(&path, bytes).await
    }

    async fn delete_document(&self, name: &str) -> Result<()> {
        let path = self.document_path(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::file_not_found(name)),
            Err(e) => Err(Error::io(path, "delete", e)),
        }
    }

    async fn list_documents(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| Error::io(&self.root, "list", e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io(&self.root, "list", e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| Error::io(entry.path(), "stat", e))?;
            if !file_type.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if is_temp_file_name(&name) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore_core::ErrorKind as Kind;
    use tempfile::TempDir;

    async fn backend() -> (FsBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FsBackend::new(temp_dir.path()).await.unwrap();
        (backend, temp_dir)
    }

    #[tokio::test]
    async fn test_new_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("data");
        let backend = FsBackend::new(&root).await.unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.root(), root.as_path());
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (backend, _dir) = backend().await;
        let err = backend.read_document("nope.json").await.unwrap_err();
        assert_eq!(err.kind(), Kind::FileNotFound);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (backend, dir) = backend().await;
        backend
            .write_document("user.json", br#"{"a":1}"#)
            .await
            .unwrap();
        assert_eq!(
            backend.read_document("user.json").await.unwrap(),
            br#"{"a":1}"#.to_vec()
        );
        assert!(dir.path().join("user.json").is_file());
    }

    #[tokio::test]
    async fn test_delete_distinguishes_missing() {
        let (backend, _dir) = backend().await;
        backend.write_document("a.json", b"{}").await.unwrap();
        backend.delete_document("a.json").await.unwrap();

        let err = backend.delete_document("a.json").await.unwrap_err();
        assert_eq!(err.kind(), Kind::FileNotFound);
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_skips_directories() {
        let (backend, dir) = backend().await;
        backend.write_document("b.json", b"{}").await.unwrap();
        backend.write_document("a.json", b"{}").await.unwrap();
        backend.write_document("log.txt", b"x").await.unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();
        std::fs::write(dir.path().join(".abc.tmp"), b"partial").unwrap();

        assert_eq!(
            backend.list_documents().await.unwrap(),
            vec!["a.json", "b.json", "log.txt"]
        );
    }

    #[tokio::test]
    async fn test_path_traversal_is_rejected() {
        let (backend, _dir) = backend().await;
        let err = backend
            .write_document("../escape.json", b"{}")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
    }
}
