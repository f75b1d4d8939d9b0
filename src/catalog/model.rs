use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Release, Track};

/// Process-wide reference data, immutable after [`Catalog::load`].
///
/// Every reachable track and release is indexed under the lowercased form
/// of each lookup key it supports. Lookup misses return empty results,
/// never errors.
#[derive(Debug, Default)]
pub struct Catalog {
    releases_by_title: HashMap<String, Release>,
    releases_by_artist: HashMap<String, Vec<Release>>,
    tracks_by_title: HashMap<String, Vec<Track>>,
    tracks_by_artist: HashMap<String, Vec<Track>>,
    skipped: usize,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog index {}: {source}", .path.display())]
    Index {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Catalog {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Indexes a release and all of its tracks. Two releases sharing a
    /// title keep only the last one in the by-title map.
    pub(crate) fn index_release(&mut self, release: Release) {
        for track in release.tracks() {
            self.tracks_by_title
                .entry(track.title.to_lowercase())
                .or_default()
                .push(track.clone());
            self.tracks_by_artist
                .entry(track.artist.to_lowercase())
                .or_default()
                .push(track.clone());
        }
        self.releases_by_artist
            .entry(release.artist().to_lowercase())
            .or_default()
            .push(release.clone());
        self.releases_by_title
            .insert(release.title().to_lowercase(), release);
    }

    pub(crate) fn note_skipped(&mut self) {
        self.skipped += 1;
    }

    /// How many index lines and release documents were skipped as
    /// malformed or unreadable during the load.
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }

    pub fn release_by_title(&self, title: &str) -> Option<&Release> {
        self.releases_by_title.get(&title.to_lowercase())
    }

    pub fn releases_by_artist(&self, artist: &str) -> &[Release] {
        self.releases_by_artist
            .get(&artist.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn tracks_by_title(&self, title: &str) -> &[Track] {
        self.tracks_by_title
            .get(&title.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn tracks_by_artist(&self, artist: &str) -> &[Track] {
        self.tracks_by_artist
            .get(&artist.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
