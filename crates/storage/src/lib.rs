//! Storage backends for docstore
//!
//! A backend moves raw document bytes in and out of some medium without
//! interpreting them. Higher layers parse, validate and audit.

mod fs;
mod memory;

pub use fs::FsBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;
use docstore_core::Result;

/// Byte-level access to named documents
///
/// Reads and deletes of a missing document fail with
/// [`Error::FileNotFound`](docstore_core::Error::FileNotFound); every other
/// failure is an [`Error::Io`](docstore_core::Error::Io). Names are
/// validated with [`docstore_core::validate_document_name`].
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the full content of a document
    async fn read_document(&self, name: &str) -> Result<Vec<u8>>;

    /// Create or replace a document; readers see the old or the new bytes, never a mix
    async fn write_document(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Remove a document
    async fn delete_document(&self, name: &str) -> Result<()>;

    /// Names of all documents, sorted
    async fn list_documents(&self) -> Result<Vec<String>>;
}
