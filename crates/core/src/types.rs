//! Domain types shared by the storage, engine and transport crates.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A parsed document: the top-level JSON object of one file
pub type Document = Map<String, Value>;

/// Parse raw document bytes, requiring a top-level JSON object
pub fn parse_document(file: &str, bytes: &[u8]) -> Result<Document> {
    serde_json::from_slice::<Document>(bytes).map_err(|e| Error::parse(file, e))
}

/// Serialize a document as compact JSON text
pub fn render_document(document: &Document) -> String {
    Value::Object(document.clone()).to_string()
}

/// Loose validity check for values looked up by key.
///
/// Absent, `null`, `false`, `0` and `""` are all treated as invalid. Arrays
/// and objects are valid even when empty.
pub fn is_invalid_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f == 0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Reject missing or empty required arguments
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Document names must name a single entry inside the data directory
pub fn validate_document_name(name: &str) -> Result<()> {
    require_non_empty("file", name)?;

    if name == "." || name == ".." {
        return Err(Error::validation("file", format!("'{name}' is reserved")));
    }

    if name.contains(['/', '\\', '\0']) {
        return Err(Error::validation(
            "file",
            format!("'{name}' must not contain path separators"),
        ));
    }

    Ok(())
}

/// How `set` treats a key that is not yet present in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetPolicy {
    /// Insert or overwrite unconditionally
    #[default]
    Permissive,
    /// Only overwrite keys that already exist
    Strict,
}

impl fmt::Display for SetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetPolicy::Permissive => write!(f, "permissive"),
            SetPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for SetPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(SetPolicy::Permissive),
            "strict" => Ok(SetPolicy::Strict),
            other => Err(Error::configuration(format!(
                "unknown set policy '{other}' (expected 'permissive' or 'strict')"
            ))),
        }
    }
}
