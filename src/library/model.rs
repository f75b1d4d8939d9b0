use std::collections::{BTreeSet, HashMap, HashSet};

use rand::rng;
use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::history::{FrequentList, RecentList};
use crate::model::{Playlist, Release, Track};

use super::auto::AutoPlaylists;

/// Case-insensitive (title, artist) key for owned releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ReleaseKey {
    title: String,
    artist: String,
}

impl ReleaseKey {
    fn of(title: &str, artist: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            artist: artist.to_lowercase(),
        }
    }

    fn for_release(release: &Release) -> Self {
        Self::of(release.title(), release.artist())
    }
}

pub(super) fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// One user's mutable library.
///
/// Owned tracks keep insertion order and are unique by structural track
/// equality; owned releases keep insertion order and are unique per
/// case-insensitive (title, artist), merged on conflicting adds. None of
/// the collections are internally synchronized.
#[derive(Debug)]
pub struct Library {
    tracks: Vec<Track>,
    track_set: HashSet<Track>,
    artists: BTreeSet<String>,
    releases: Vec<Release>,
    release_index: HashMap<ReleaseKey, usize>,
    ratings: HashMap<Track, u8>,
    favorites: Vec<Track>,
    playlists: Vec<Playlist>,
    play_counts: HashMap<Track, u32>,
    recent: RecentList,
    frequent: FrequentList,
    auto: Option<AutoPlaylists>,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            track_set: HashSet::new(),
            artists: BTreeSet::new(),
            releases: Vec::new(),
            release_index: HashMap::new(),
            ratings: HashMap::new(),
            favorites: Vec::new(),
            playlists: Vec::new(),
            play_counts: HashMap::new(),
            recent: RecentList::new(),
            frequent: FrequentList::new(),
            auto: None,
        }
    }

    // ----- ownership -----

    /// Adds a track to the library (idempotent) and ensures an owned
    /// release entry exists for its (release title, artist) pair.
    ///
    /// When the library has no matching release, a partial one is
    /// synthesized with genre and year copied from the catalog when a
    /// case-insensitive match exists there, `"Unknown"`/`0` otherwise.
    /// When a matching release exists but lacks this track, the entry is
    /// replaced by a new value with the track appended.
    pub fn add_track(&mut self, track: Track, catalog: &Catalog) {
        self.insert_owned_track(&track);
        self.ensure_release_for(&track, catalog);
    }

    fn insert_owned_track(&mut self, track: &Track) {
        if self.track_set.insert(track.clone()) {
            self.tracks.push(track.clone());
            self.artists.insert(track.artist.clone());
        }
    }

    fn ensure_release_for(&mut self, track: &Track, catalog: &Catalog) {
        let key = ReleaseKey::of(&track.release_title, &track.artist);
        match self.release_index.get(&key).copied() {
            Some(idx) => {
                if !self.releases[idx].tracks().contains(track) {
                    let updated = self.releases[idx].with_track(track.clone());
                    self.releases[idx] = updated;
                }
            }
            None => {
                let (genre, year) = catalog
                    .release_by_title(&track.release_title)
                    .filter(|r| eq_ci(r.artist(), &track.artist))
                    .map(|r| (r.genre().to_string(), r.year()))
                    .unwrap_or_else(|| ("Unknown".to_string(), 0));
                let partial = Release::new(
                    track.release_title.clone(),
                    track.artist.clone(),
                    genre,
                    year,
                    vec![track.clone()],
                );
                self.release_index.insert(key, self.releases.len());
                self.releases.push(partial);
            }
        }
    }

    /// Adds a release and all of its tracks. When the library already
    /// owns a release with the same (title, artist), the track sequences
    /// are unioned (existing order first, then new tracks not already
    /// present) and the entry is replaced.
    pub fn add_release(&mut self, release: Release) {
        let key = ReleaseKey::for_release(&release);
        let idx = match self.release_index.get(&key).copied() {
            Some(idx) => {
                let mut tracks = self.releases[idx].tracks().to_vec();
                for track in release.tracks() {
                    if !tracks.contains(track) {
                        tracks.push(track.clone());
                    }
                }
                self.releases[idx] = Release::new(
                    release.title(),
                    release.artist(),
                    release.genre(),
                    release.year(),
                    tracks,
                );
                idx
            }
            None => {
                self.release_index.insert(key, self.releases.len());
                self.releases.push(release);
                self.releases.len() - 1
            }
        };

        let tracks = self.releases[idx].tracks().to_vec();
        for track in tracks {
            self.insert_owned_track(&track);
        }
    }

    /// Removes a track from the library, its favorites, every playlist
    /// and both playback trackers, and clears its rating and play count.
    /// The artist disappears from the artist set when no other owned
    /// track shares it. Owned releases are untouched. Returns false when
    /// the track was not owned.
    pub fn remove_track(&mut self, track: &Track) -> bool {
        if !self.track_set.remove(track) {
            return false;
        }
        self.tracks.retain(|t| t != track);
        self.favorites.retain(|t| t != track);
        for playlist in &mut self.playlists {
            playlist.purge(track);
        }
        self.ratings.remove(track);
        self.play_counts.remove(track);
        self.recent.remove(track);
        self.frequent.remove(track);
        if !self.tracks.iter().any(|t| t.artist == track.artist) {
            self.artists.remove(&track.artist);
        }
        true
    }

    /// Removes the owned release matching `release` on (title, artist),
    /// then removes every one of its tracks via [`Library::remove_track`].
    pub fn remove_release(&mut self, release: &Release) -> bool {
        let key = ReleaseKey::for_release(release);
        let Some(idx) = self.release_index.get(&key).copied() else {
            return false;
        };
        let removed = self.releases.remove(idx);
        self.rebuild_release_index();
        for track in removed.tracks() {
            self.remove_track(track);
        }
        true
    }

    fn rebuild_release_index(&mut self) {
        self.release_index = self
            .releases
            .iter()
            .enumerate()
            .map(|(idx, r)| (ReleaseKey::for_release(r), idx))
            .collect();
    }

    // ----- accessors -----

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn contains(&self, track: &Track) -> bool {
        self.track_set.contains(track)
    }

    /// Artist names with at least one owned track, sorted.
    pub fn artists(&self) -> Vec<String> {
        self.artists.iter().cloned().collect()
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn favorites(&self) -> &[Track] {
        &self.favorites
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn rating(&self, track: &Track) -> Option<u8> {
        self.ratings.get(track).copied()
    }

    pub fn play_count(&self, track: &Track) -> u32 {
        self.play_counts.get(track).copied().unwrap_or(0)
    }

    // ----- queries -----

    pub fn tracks_by_title(&self, title: &str) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| eq_ci(&t.title, title))
            .cloned()
            .collect()
    }

    pub fn tracks_by_artist(&self, artist: &str) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| eq_ci(&t.artist, artist))
            .cloned()
            .collect()
    }

    pub fn releases_by_title(&self, title: &str) -> Vec<Release> {
        self.releases
            .iter()
            .filter(|r| eq_ci(r.title(), title))
            .cloned()
            .collect()
    }

    pub fn releases_by_artist(&self, artist: &str) -> Vec<Release> {
        self.releases
            .iter()
            .filter(|r| eq_ci(r.artist(), artist))
            .cloned()
            .collect()
    }

    /// Tracks of every owned release whose genre matches, concatenated in
    /// release order.
    pub fn tracks_by_genre(&self, genre: &str) -> Vec<Track> {
        self.releases
            .iter()
            .filter(|r| eq_ci(r.genre(), genre))
            .flat_map(|r| r.tracks().iter().cloned())
            .collect()
    }

    /// The owned release with this (title, artist), case-insensitive.
    pub fn release(&self, title: &str, artist: &str) -> Option<&Release> {
        self.release_index
            .get(&ReleaseKey::of(title, artist))
            .map(|&idx| &self.releases[idx])
    }

    pub fn owns_release(&self, title: &str, artist: &str) -> bool {
        self.release_index.contains_key(&ReleaseKey::of(title, artist))
    }

    /// The catalog release containing an owned track with this title and
    /// artist (case-insensitive field match). The library may or may not
    /// own the release itself; see [`Library::owns_release`].
    pub fn release_info<'c>(
        &self,
        title: &str,
        artist: &str,
        catalog: &'c Catalog,
    ) -> Option<&'c Release> {
        let track = self
            .tracks
            .iter()
            .find(|t| eq_ci(&t.title, title) && eq_ci(&t.artist, artist))?;
        catalog
            .release_by_title(&track.release_title)
            .filter(|r| eq_ci(r.artist(), &track.artist))
    }

    // ----- rating & favorites -----

    /// Records a rating in `[1, 5]` for an owned track. Rating 5 adds the
    /// track to favorites (idempotently); any lower rating removes it.
    /// Returns false, with no mutation, for an out-of-range rating or an
    /// unowned track.
    pub fn rate(&mut self, track: &Track, rating: u8) -> bool {
        if !(1..=5).contains(&rating) || !self.track_set.contains(track) {
            return false;
        }
        self.ratings.insert(track.clone(), rating);
        if rating == 5 {
            if !self.favorites.contains(track) {
                self.favorites.push(track.clone());
            }
        } else {
            self.favorites.retain(|t| t != track);
        }
        true
    }

    /// Marks an owned track as favorite, independent of its rating.
    /// Returns false for an unowned track.
    pub fn mark_favorite(&mut self, track: &Track) -> bool {
        if !self.track_set.contains(track) {
            return false;
        }
        if !self.favorites.contains(track) {
            self.favorites.push(track.clone());
        }
        true
    }

    // ----- sorting, shuffling, playback -----

    pub fn sorted_by_title(&self) -> Vec<Track> {
        let mut tracks = self.tracks.clone();
        tracks.sort_by(|a, b| a.title.cmp(&b.title));
        tracks
    }

    pub fn sorted_by_artist(&self) -> Vec<Track> {
        let mut tracks = self.tracks.clone();
        tracks.sort_by(|a, b| a.artist.cmp(&b.artist));
        tracks
    }

    /// Rated tracks only, ascending by rating; unrated tracks are
    /// excluded.
    pub fn sorted_by_rating(&self) -> Vec<Track> {
        let mut rated: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| self.ratings.contains_key(t))
            .cloned()
            .collect();
        rated.sort_by_key(|t| self.ratings[t]);
        rated
    }

    /// A uniformly random permutation of the owned tracks. The stored
    /// order is untouched.
    pub fn shuffled(&self) -> Vec<Track> {
        let mut tracks = self.tracks.clone();
        tracks.shuffle(&mut rng());
        tracks
    }

    /// Plays every owned track matching both fields exactly
    /// (case-sensitive, unlike the queries): increments its play count,
    /// pushes it into the recency tracker and records it in the frequency
    /// tracker with the updated count. Returns false when nothing matched.
    pub fn play(&mut self, title: &str, artist: &str) -> bool {
        let matched: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| t.title == title && t.artist == artist)
            .cloned()
            .collect();
        if matched.is_empty() {
            return false;
        }
        for track in matched {
            let count = self.play_counts.entry(track.clone()).or_insert(0);
            *count += 1;
            let count = *count;
            self.recent.push(track.clone());
            self.frequent.record(track, count);
        }
        true
    }

    /// Recently played tracks, most recent first.
    pub fn recently_played(&self) -> Vec<Track> {
        self.recent.tracks()
    }

    /// Frequently played tracks, descending by recorded play count.
    pub fn frequently_played(&self) -> Vec<Track> {
        self.frequent.tracks()
    }

    /// Re-seeds the recency tracker during document decoding; replay must
    /// run oldest-first.
    pub(crate) fn restore_recent(&mut self, track: Track) {
        self.recent.push(track);
    }

    /// Re-seeds the frequency tracker during document decoding with the
    /// track's current (freshly loaded, so zero) play count.
    pub(crate) fn restore_frequent(&mut self, track: Track) {
        let count = self.play_count(&track);
        self.frequent.record(track, count);
    }

    // ----- playlists -----

    pub fn create_playlist(&mut self, name: impl Into<String>) {
        self.playlists.push(Playlist::new(name));
    }

    /// First playlist with this exact name.
    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name() == name)
    }

    pub fn playlist_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.name() == name)
    }

    pub(super) fn auto_playlists(&self) -> Option<&AutoPlaylists> {
        self.auto.as_ref()
    }

    pub(super) fn set_auto_playlists(&mut self, auto: AutoPlaylists) {
        self.auto = Some(auto);
    }
}
