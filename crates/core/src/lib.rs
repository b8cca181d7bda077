//! Core domain types, errors, and constants for `docstore`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum, its `ErrorKind` classification and the
//!   `Result` alias shared by every crate in the workspace.
//! - **`types`**: document-name and argument validation, the loose-falsy
//!   value predicate, and the `SetPolicy` switch.
//! - **`constants`**: default paths, merge filters and environment variable
//!   names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, ErrorKind, Result},
    types::*,
};
