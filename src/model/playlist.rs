use rand::rng;
use rand::seq::SliceRandom;

use super::track::Track;

/// A named ordered sequence of tracks. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    pub fn with_tracks(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Removes the first occurrence of `track`. Returns whether anything
    /// was removed.
    pub fn remove_track(&mut self, track: &Track) -> bool {
        match self.tracks.iter().position(|t| t == track) {
            Some(idx) => {
                self.tracks.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes every occurrence of `track`.
    pub(crate) fn purge(&mut self, track: &Track) {
        self.tracks.retain(|t| t != track);
    }

    /// A uniformly random permutation of the playlist's tracks. The stored
    /// order is untouched.
    pub fn shuffled(&self) -> Vec<Track> {
        let mut tracks = self.tracks.clone();
        tracks.shuffle(&mut rng());
        tracks
    }
}
