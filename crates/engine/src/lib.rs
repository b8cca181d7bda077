//! The docstore engine
//!
//! - [`DocumentStore`]: get/set/remove of keys inside one document, plus
//!   document create/delete.
//! - [`SetAlgebra`]: union, intersection and difference of two documents'
//!   top-level key sets.
//! - [`MergeEngine`]: aggregates every eligible document into `merge.json`.
//! - [`Database`]: the audited facade transports talk to. Each call yields
//!   exactly one audit line describing its outcome.
//!
//! Nothing is cached. Every operation re-reads the backing documents, and
//! mutations are a read followed by a separate write. Without
//! [`DocumentLocks`] two concurrent writers to one document race and the
//! last write wins.

mod algebra;
mod database;
mod document;
mod locks;
mod merge;

pub use algebra::{difference_keys, intersect_keys, union_keys, SetAlgebra};
pub use database::Database;
pub use document::DocumentStore;
pub use locks::{DocumentGuard, DocumentLocks};
pub use merge::{is_mergeable, merge_key, MergeEngine};
