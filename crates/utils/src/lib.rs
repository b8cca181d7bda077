//! Shared utilities for docstore
//!
//! File helpers used by the storage backend and the subscriber setup used
//! by the binaries.

pub mod atomic_file;
pub mod tracing;

pub use atomic_file::*;
