//! Core value types shared by the catalog and per-user libraries.
//!
//! `Track` carries structural identity (title, artist, release title),
//! `Release` is an immutable album-like grouping, `Playlist` a named
//! ordered track sequence.

mod playlist;
mod release;
mod track;

pub use playlist::Playlist;
pub use release::Release;
pub use track::Track;
