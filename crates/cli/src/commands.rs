use clap::Subcommand;
use std::net::SocketAddr;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the store over HTTP
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Print a document, or one value from it
    Get { file: String, key: Option<String> },

    /// Set a key to a string value
    Set {
        file: String,
        key: String,
        value: String,
    },

    /// Remove a key
    Remove { file: String, key: String },

    /// Create a document, optionally with JSON content
    Create {
        file: String,
        /// A JSON object; defaults to `{}`
        content: Option<String>,
    },

    /// Delete a document
    Delete { file: String },

    /// Aggregate all documents into merge.json
    Merge,

    /// Keys found in either document
    Union { file_a: String, file_b: String },

    /// Keys found in both documents
    Intersect { file_a: String, file_b: String },

    /// Keys whose value is missing or falsy on the other side
    Difference { file_a: String, file_b: String },
}
