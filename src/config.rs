//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to locate the
//! catalog files and the per-user library documents, and helpers to load
//! configuration from disk.

mod load;
mod schema;

pub use schema::*;
