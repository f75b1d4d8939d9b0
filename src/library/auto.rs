use crate::model::{Playlist, Track};

use super::model::{Library, eq_ci};

/// A genre only materializes an auto-playlist once its owned releases
/// aggregate this many tracks.
const GENRE_AUTO_MIN_TRACKS: usize = 10;

/// The derived playlist set, replaced wholesale on every rebuild and
/// never persisted.
#[derive(Debug)]
pub(super) struct AutoPlaylists {
    pub(super) favorites: Playlist,
    pub(super) top_rated: Playlist,
    /// (genre as stored, playlist) pairs, first-seen release order.
    pub(super) genres: Vec<(String, Playlist)>,
}

impl Library {
    /// Recomputes the auto-playlists from the current library state:
    /// favorites (in favorites order), top-rated (rating ≥ 4, owned-track
    /// order) and one playlist per genre aggregating at least
    /// `GENRE_AUTO_MIN_TRACKS` tracks across the owned releases.
    pub fn rebuild_auto_playlists(&mut self) {
        let favorites = Playlist::with_tracks("Favorites (Auto)", self.favorites().to_vec());

        let top_rated = Playlist::with_tracks(
            "Top Rated (Auto)",
            self.tracks()
                .iter()
                .filter(|t| self.rating(t).is_some_and(|r| r >= 4))
                .cloned()
                .collect(),
        );

        // Genres group case-sensitively, exactly as stored on the release.
        let mut by_genre: Vec<(String, Vec<Track>)> = Vec::new();
        for release in self.releases() {
            match by_genre.iter_mut().find(|(g, _)| g == release.genre()) {
                Some((_, tracks)) => tracks.extend(release.tracks().iter().cloned()),
                None => by_genre.push((
                    release.genre().to_string(),
                    release.tracks().to_vec(),
                )),
            }
        }
        let genres = by_genre
            .into_iter()
            .filter(|(_, tracks)| tracks.len() >= GENRE_AUTO_MIN_TRACKS)
            .map(|(genre, tracks)| {
                let playlist = Playlist::with_tracks(format!("{genre} (Auto)"), tracks);
                (genre, playlist)
            })
            .collect();

        self.set_auto_playlists(AutoPlaylists {
            favorites,
            top_rated,
            genres,
        });
    }

    /// Absent until the first rebuild.
    pub fn favorites_auto_playlist(&self) -> Option<&Playlist> {
        self.auto_playlists().map(|a| &a.favorites)
    }

    /// Absent until the first rebuild.
    pub fn top_rated_auto_playlist(&self) -> Option<&Playlist> {
        self.auto_playlists().map(|a| &a.top_rated)
    }

    /// Case-insensitive lookup by genre name; absent for genres below the
    /// materialization threshold.
    pub fn genre_auto_playlist(&self, genre: &str) -> Option<&Playlist> {
        self.auto_playlists()?
            .genres
            .iter()
            .find(|(g, _)| eq_ci(g, genre))
            .map(|(_, playlist)| playlist)
    }
}
