use std::path::PathBuf;

/// Result type alias for docstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classification used by transports to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    FileNotFound,
    FileAlreadyExists,
    InvalidKey,
    Parse,
    Io,
    Configuration,
}

/// Core error type for docstore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was missing, empty or malformed
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The named document does not exist
    #[error("File {file} does not exist")]
    FileNotFound { file: String },

    /// A document with this name already exists
    #[error("Error creating file. {file} already exists")]
    FileAlreadyExists { file: String },

    /// The key is absent or holds a falsy value
    #[error("Error invalid key \"{key}\"")]
    InvalidKey { key: String },

    /// Stored content is not a JSON object
    #[error("failed to parse '{file}' as a JSON object: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other read/write/delete/list failure
    #[error("file system {operation} operation failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a validation error for a named argument
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn file_not_found(file: impl Into<String>) -> Self {
        Error::FileNotFound { file: file.into() }
    }

    #[must_use]
    pub fn file_already_exists(file: impl Into<String>) -> Self {
        Error::FileAlreadyExists { file: file.into() }
    }

    #[must_use]
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Error::InvalidKey { key: key.into() }
    }

    #[must_use]
    pub fn parse(file: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Parse {
            file: file.into(),
            source,
        }
    }

    /// Create an I/O error with the path and operation that failed
    #[must_use]
    pub fn io(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::FileNotFound { .. } => ErrorKind::FileNotFound,
            Error::FileAlreadyExists { .. } => ErrorKind::FileAlreadyExists,
            Error::InvalidKey { .. } => ErrorKind::InvalidKey,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Io { .. } => ErrorKind::Io,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_client_facing_text() {
        assert_eq!(
            Error::invalid_key("email").to_string(),
            "Error invalid key \"email\""
        );
        assert_eq!(
            Error::file_already_exists("user.json").to_string(),
            "Error creating file. user.json already exists"
        );
        assert_eq!(
            Error::file_not_found("user.json").to_string(),
            "File user.json does not exist"
        );
    }

    #[test]
    fn test_kind_classification() {
        let io = Error::io(
            "user.json",
            "read",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);

        let parse_source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parse = Error::parse("user.json", parse_source);
        assert_eq!(parse.kind(), ErrorKind::Parse);

        assert_eq!(Error::invalid_key("k").kind(), ErrorKind::InvalidKey);
        assert_eq!(
            Error::validation("file", "must not be empty").kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::file_not_found("x").kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        match err {
            Error::Io { operation, .. } => assert_eq!(operation, "unknown"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
