/// Constants used throughout the docstore codebase
// Storage defaults
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_LOG_FILE: &str = "log.txt";
pub const DEFAULT_BIND_HOST: [u8; 4] = [127, 0, 0, 1];
pub const DEFAULT_PORT: u16 = 5000;

// Merge
pub const MERGE_DOCUMENT_NAME: &str = "merge.json";
pub const MERGE_INCLUDE_PATTERN: &str = ".json";
pub const MERGE_EXCLUDE_PATTERN: &str = "package";

// Environment variable names
pub const DOCSTORE_DATA_DIR_VAR: &str = "DOCSTORE_DATA_DIR";
pub const DOCSTORE_LOG_FILE_VAR: &str = "DOCSTORE_LOG_FILE";
pub const DOCSTORE_BIND_VAR: &str = "DOCSTORE_BIND";
pub const DOCSTORE_SET_POLICY_VAR: &str = "DOCSTORE_SET_POLICY";
pub const DOCSTORE_LOCK_DOCUMENTS_VAR: &str = "DOCSTORE_LOCK_DOCUMENTS";

// Reported by the status endpoint
pub const SERVICE_OWNER: &str = "docstore";
