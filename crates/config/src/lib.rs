//! Configuration for docstore
//!
//! [`Config`] is the resolved configuration; [`ConfigLoader`] builds one from
//! defaults, an optional JSON file, `DOCSTORE_*` environment variables and
//! explicit overrides, in that order.

pub mod config;
pub mod loader;

pub use config::Config;
pub use loader::ConfigLoader;
