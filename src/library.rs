//! Per-user mutable library state.
//!
//! Owned tracks and releases (with add-time merge), ratings, favorites,
//! named playlists, play counts, the global playback trackers, and the
//! derived auto-playlists.

mod auto;
mod model;

pub use model::Library;

#[cfg(test)]
mod tests;
