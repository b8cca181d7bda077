//! Set operations over the top-level keys of two documents

use crate::document::load_document;
use docstore_core::{is_invalid_value, validate_document_name, Document, Result};
use docstore_storage::StorageBackend;
use std::sync::Arc;

/// Keys of `a` in order, then keys of `b` not already seen
pub fn union_keys(a: &Document, b: &Document) -> Vec<String> {
    let mut keys: Vec<String> = a.keys().cloned().collect();
    for key in b.keys() {
        if !a.contains_key(key) {
            keys.push(key.clone());
        }
    }
    keys
}

/// Keys present in both documents, in `a`'s order
pub fn intersect_keys(a: &Document, b: &Document) -> Vec<String> {
    a.keys().filter(|key| b.contains_key(*key)).cloned().collect()
}

/// Keys of `a` whose value in `b` is falsy or absent, then the same for `b`
/// against `a`.
///
/// Uses the loose validity check, so a key present in both documents with a
/// falsy value on either side is reported as different.
pub fn difference_keys(a: &Document, b: &Document) -> Vec<String> {
    a.keys()
        .filter(|key| is_invalid_value(b.get(*key)))
        .chain(b.keys().filter(|key| is_invalid_value(a.get(*key))))
        .cloned()
        .collect()
}

/// Reads two documents and combines their key sets
#[derive(Clone)]
pub struct SetAlgebra {
    backend: Arc<dyn StorageBackend>,
}

impl SetAlgebra {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    async fn load_pair(&self, a: &str, b: &str) -> Result<(Document, Document)> {
        validate_document_name(a)?;
        validate_document_name(b)?;
        let first = load_document(self.backend.as_ref(), a).await?;
        let second = load_document(self.backend.as_ref(), b).await?;
        Ok((first, second))
    }

    pub async fn union(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let (first, second) = self.load_pair(a, b).await?;
        Ok(union_keys(&first, &second))
    }

    pub async fn intersect(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let (first, second) = self.load_pair(a, b).await?;
        Ok(intersect_keys(&first, &second))
    }

    pub async fn difference(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let (first, second) = self.load_pair(a, b).await?;
        Ok(difference_keys(&first, &second))
    }
}
