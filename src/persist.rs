//! Durable per-user library state.
//!
//! `document` defines the serialized JSON shape of a library and the
//! encode/decode logic against the catalog; `store` reads and writes one
//! pretty-printed document per user.

mod document;
mod store;

pub use document::LibraryDocument;
pub use store::{LibraryStore, StoreError};
