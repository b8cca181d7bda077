//! Aggregation of all documents into `merge.json`

use docstore_core::{
    parse_document, render_document, Document, Result, MERGE_DOCUMENT_NAME,
    MERGE_EXCLUDE_PATTERN, MERGE_INCLUDE_PATTERN,
};
use docstore_storage::StorageBackend;
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Substring filter: contains `.json` and not `package`
pub fn is_mergeable(name: &str) -> bool {
    name.contains(MERGE_INCLUDE_PATTERN) && !name.contains(MERGE_EXCLUDE_PATTERN)
}

/// Everything before the first `.`: `user.json` becomes `user`
pub fn merge_key(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Builds `merge.json` from every eligible document
#[derive(Clone)]
pub struct MergeEngine {
    backend: Arc<dyn StorageBackend>,
}

impl MergeEngine {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Recompute and write the merged document, returning it
    ///
    /// Nothing is written unless every eligible document was read and parsed.
    pub async fn merge_data(&self) -> Result<Document> {
        let names: Vec<String> = self
            .backend
            .list_documents()
            .await?
            .into_iter()
            .filter(|name| is_mergeable(name))
            .collect();
        debug!(documents = names.len(), "merging documents");

        let contents = try_join_all(names.iter().map(|name| self.backend.read_document(name))).await?;

        let mut merged = Document::new();
        for (name, bytes) in names.iter().zip(contents) {
            let document = parse_document(name, &bytes)?;
            merged.insert(merge_key(name).to_string(), Value::Object(document));
        }

        self.backend
            .write_document(MERGE_DOCUMENT_NAME, render_document(&merged).as_bytes())
            .await?;
        Ok(merged)
    }
}
