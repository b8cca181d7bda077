//! Audited facade over the document store, set algebra and merge engine

use crate::algebra::SetAlgebra;
use crate::document::DocumentStore;
use crate::locks::DocumentLocks;
use crate::merge::MergeEngine;
use docstore_audit::{AuditLogger, FileAuditSink};
use docstore_config::Config;
use docstore_core::{Document, Error, ErrorKind, Result};
use docstore_storage::{FsBackend, StorageBackend};
use std::sync::Arc;
use tracing::{debug, info};

/// Audit message for a failure, chosen by error kind
fn failure_message(error: &Error, key: &str, file: &str) -> String {
    match error.kind() {
        ErrorKind::InvalidKey => format!("Error invalid key {key}"),
        _ => format!("Error reading file {file}"),
    }
}

/// Entry point for transports: runs an operation, writes its audit line,
/// returns the operation's own result
#[derive(Clone)]
pub struct Database {
    documents: DocumentStore,
    algebra: SetAlgebra,
    merger: MergeEngine,
    audit: AuditLogger,
}

impl Database {
    pub fn new(documents: DocumentStore, audit: AuditLogger) -> Self {
        let backend = Arc::clone(documents.backend());
        Self {
            algebra: SetAlgebra::new(Arc::clone(&backend)),
            merger: MergeEngine::new(backend),
            documents,
            audit,
        }
    }

    /// File-backed database for a resolved configuration
    pub async fn open(config: &Config) -> Result<Self> {
        let backend: Arc<dyn StorageBackend> = Arc::new(FsBackend::new(&config.data_dir).await?);

        let mut documents = DocumentStore::new(backend).with_set_policy(config.set_policy);
        if config.lock_documents {
            documents = documents.with_document_locks(DocumentLocks::new());
        }

        let log_path = config.log_path();
        info!(
            data_dir = %config.data_dir.display(),
            audit_log = %log_path.display(),
            set_policy = %config.set_policy,
            lock_documents = config.lock_documents,
            "opened document store"
        );

        Ok(Self::new(
            documents,
            AuditLogger::new(Arc::new(FileAuditSink::new(log_path))),
        ))
    }

    /// Write the audit line for an outcome unless the request never started
    async fn audit<T>(&self, result: &Result<T>, message: impl FnOnce(&Result<T>) -> String) {
        if let Err(e) = result {
            if e.kind() == ErrorKind::Validation {
                debug!(error = %e, "rejected before reaching storage");
                return;
            }
        }
        self.audit.record(message(result)).await;
    }

    pub async fn get(&self, file: &str, key: Option<&str>) -> Result<String> {
        let result = self.documents.get(file, key).await;
        self.audit(&result, |r| match r {
            Ok(value) => value.clone(),
            Err(e) => failure_message(e, key.unwrap_or_default(), file),
        })
        .await;
        result
    }

    pub async fn set(&self, file: &str, key: &str, value: &str) -> Result<()> {
        let result = self.documents.set(file, key, value).await;
        self.audit(&result, |r| match r {
            Ok(()) => format!("{file} {key} updated to {value}"),
            Err(e) => failure_message(e, key, file),
        })
        .await;
        result
    }

    pub async fn remove(&self, file: &str, key: &str) -> Result<()> {
        let result = self.documents.remove(file, key).await;
        self.audit(&result, |r| match r {
            Ok(()) => format!("Deleted key {key} from {file}"),
            Err(e) => failure_message(e, key, file),
        })
        .await;
        result
    }

    pub async fn create_file(&self, file: &str, content: Option<Document>) -> Result<()> {
        let result = self.documents.create_file(file, content).await;
        self.audit(&result, |r| match r {
            Ok(()) => format!("File {file} created"),
            Err(e) if e.kind() == ErrorKind::FileAlreadyExists => {
                format!("File {file} already exists")
            }
            Err(_) => format!("Error creating file {file}"),
        })
        .await;
        result
    }

    pub async fn delete_file(&self, file: &str) -> Result<()> {
        let result = self.documents.delete_file(file).await;
        self.audit(&result, |r| match r {
            Ok(()) => format!("File {file} deleted"),
            Err(e) if e.kind() == ErrorKind::FileNotFound => format!("File {file} does not exist"),
            Err(_) => format!("Error deleting file {file}"),
        })
        .await;
        result
    }

    pub async fn merge_data(&self) -> Result<Document> {
        let result = self.merger.merge_data().await;
        self.audit(&result, |r| match r {
            Ok(_) => "Successful merge".to_string(),
            Err(_) => "Error merging json files".to_string(),
        })
        .await;
        result
    }

    pub async fn union(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let result = self.algebra.union(a, b).await;
        self.audit(&result, |r| key_list_message(r, a, "U", b)).await;
        result
    }

    pub async fn intersect(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let result = self.algebra.intersect(a, b).await;
        self.audit(&result, |r| key_list_message(r, a, "^", b)).await;
        result
    }

    pub async fn difference(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let result = self.algebra.difference(a, b).await;
        self.audit(&result, |r| key_list_message(r, a, "-", b)).await;
        result
    }
}

/// Comma-joined keys on success, `Error <a> <op> <b>` on failure
fn key_list_message(result: &Result<Vec<String>>, a: &str, op: &str, b: &str) -> String {
    match result {
        Ok(keys) => keys.join(","),
        Err(_) => format!("Error {a} {op} {b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore_audit::MemoryAuditSink;
    use docstore_storage::MemoryBackend;

    fn database() -> (Database, MemoryBackend, Arc<MemoryAuditSink>) {
        let backend = MemoryBackend::new();
        let sink = Arc::new(MemoryAuditSink::new());
        let db = Database::new(
            DocumentStore::new(Arc::new(backend.clone())),
            AuditLogger::new(sink.clone()),
        );
        (db, backend, sink)
    }

    #[tokio::test]
    async fn test_get_messages() {
        let (db, backend, sink) = database();
        backend.insert("user.json", r#"{"email":"s@r.com","n":0}"#);

        db.get("user.json", Some("email")).await.unwrap();
        db.get("user.json", None).await.unwrap();
        db.get("user.json", Some("n")).await.unwrap_err();
        db.get("nope.json", Some("email")).await.unwrap_err();

        assert_eq!(
            sink.messages(),
            vec![
                "s@r.com",
                r#"{"email":"s@r.com","n":0}"#,
                "Error invalid key n",
                "Error reading file nope.json",
            ]
        );
    }

    #[tokio::test]
    async fn test_mutation_messages() {
        let (db, _, sink) = database();

        db.create_file("user.json", None).await.unwrap();
        db.create_file("user.json", None).await.unwrap_err();
        db.set("user.json", "email", "e").await.unwrap();
        db.set("ghost.json", "email", "e").await.unwrap_err();
        db.remove("user.json", "email").await.unwrap();
        db.remove("user.json", "email").await.unwrap_err();
        db.delete_file("user.json").await.unwrap();
        db.delete_file("user.json").await.unwrap_err();

        assert_eq!(
            sink.messages(),
            vec![
                "File user.json created",
                "File user.json already exists",
                "user.json email updated to e",
                "Error reading file ghost.json",
                "Deleted key email from user.json",
                "Error invalid key email",
                "File user.json deleted",
                "File user.json does not exist",
            ]
        );
    }

    #[tokio::test]
    async fn test_set_algebra_and_merge_messages() {
        let (db, backend, sink) = database();
        backend.insert("scott.json", r#"{"firstname":"S","lastname":"R","email":"e"}"#);
        backend.insert("andrew.json", r#"{"firstname":"A","lastname":"R","username":"u"}"#);

        db.union("scott.json", "andrew.json").await.unwrap();
        db.intersect("scott.json", "andrew.json").await.unwrap();
        db.difference("scott.json", "andrew.json").await.unwrap();
        db.union("scott.json", "x.json").await.unwrap_err();
        db.intersect("x.json", "scott.json").await.unwrap_err();
        db.difference("scott.json", "x.json").await.unwrap_err();
        db.merge_data().await.unwrap();
        backend.insert("broken.json", "nope");
        db.merge_data().await.unwrap_err();

        assert_eq!(
            sink.messages(),
            vec![
                "firstname,lastname,email,username",
                "firstname,lastname",
                "email,username",
                "Error scott.json U x.json",
                "Error x.json ^ scott.json",
                "Error scott.json - x.json",
                "Successful merge",
                "Error merging json files",
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_failures_are_not_audited() {
        let (db, backend, sink) = database();
        backend.insert("user.json", "{}");

        db.set("user.json", "", "v").await.unwrap_err();
        db.set("", "k", "v").await.unwrap_err();
        db.remove("user.json", "").await.unwrap_err();
        db.union("../a.json", "user.json").await.unwrap_err();

        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_exactly_one_line_per_operation() {
        let (db, backend, sink) = database();
        backend.insert("a.json", r#"{"k":"v"}"#);

        for _ in 0..5 {
            db.get("a.json", Some("k")).await.unwrap();
        }
        assert_eq!(sink.lines().len(), 5);
        assert!(sink.lines().iter().all(|line| line.starts_with("v, ") && line.ends_with('\n')));
    }

    #[tokio::test]
    async fn test_open_uses_configured_paths() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("docs"),
            ..Config::default()
        };
        let db = Database::open(&config).await.unwrap();
        db.create_file("a.json", None).await.unwrap();

        assert!(config.data_dir.join("a.json").is_file());
        let log = std::fs::read_to_string(config.log_path()).unwrap();
        assert!(log.starts_with("File a.json created, "));
    }
}
