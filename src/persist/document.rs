use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::library::Library;
use crate::model::Track;

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Serialized form of one user's library.
///
/// Field names are the document's wire names; every song reference is
/// reduced to its identity fields. Missing arrays deserialize as empty so
/// older or hand-edited documents still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryDocument {
    pub songs: Vec<TrackRef>,
    pub albums: Vec<ReleaseDoc>,
    pub rated_songs: Vec<RatingRef>,
    pub playlists: Vec<PlaylistDoc>,
    pub recently_played_songs: Vec<TrackRef>,
    pub frequently_played_songs: Vec<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRef {
    pub title: String,
    pub artist: String,
    pub release_title: String,
}

impl TrackRef {
    fn of(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            release_title: track.release_title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDoc {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    pub songs: Vec<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRef {
    pub title: String,
    pub artist: String,
    pub rating: i32,
}

/// Playlist members carry title and artist only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntryRef {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDoc {
    pub name: String,
    pub songs: Vec<PlaylistEntryRef>,
}

impl LibraryDocument {
    /// Serializes a library: owned tracks, releases with nested track
    /// lists, ratings (in owned-track order, for deterministic output),
    /// playlists, and both playback lists.
    pub fn encode(library: &Library) -> Self {
        Self {
            songs: library.tracks().iter().map(TrackRef::of).collect(),
            albums: library
                .releases()
                .iter()
                .map(|r| ReleaseDoc {
                    title: r.title().to_string(),
                    artist: r.artist().to_string(),
                    genre: r.genre().to_string(),
                    year: r.year(),
                    songs: r.tracks().iter().map(TrackRef::of).collect(),
                })
                .collect(),
            rated_songs: library
                .tracks()
                .iter()
                .filter_map(|t| {
                    library.rating(t).map(|rating| RatingRef {
                        title: t.title.clone(),
                        artist: t.artist.clone(),
                        rating: i32::from(rating),
                    })
                })
                .collect(),
            playlists: library
                .playlists()
                .iter()
                .map(|p| PlaylistDoc {
                    name: p.name().to_string(),
                    songs: p
                        .tracks()
                        .iter()
                        .map(|t| PlaylistEntryRef {
                            title: t.title.clone(),
                            artist: t.artist.clone(),
                        })
                        .collect(),
                })
                .collect(),
            recently_played_songs: library.recently_played().iter().map(TrackRef::of).collect(),
            frequently_played_songs: library
                .frequently_played()
                .iter()
                .map(TrackRef::of)
                .collect(),
        }
    }

    /// Rebuilds a library from this document against `catalog`.
    ///
    /// Song and album references resolve against the catalog by
    /// case-insensitive field match and are silently dropped when no
    /// match exists: a reference to something the catalog no longer
    /// carries simply disappears. Ratings, playlist members and playback
    /// entries then re-resolve against the rebuilt library, so an entity
    /// must have survived catalog resolution before any state referencing
    /// it can be restored.
    pub fn decode(&self, catalog: &Catalog) -> Library {
        let mut library = Library::new();

        for song in &self.songs {
            if let Some(track) = resolve_catalog_track(catalog, song) {
                library.add_track(track, catalog);
            }
        }

        for album in &self.albums {
            let release = catalog
                .release_by_title(&album.title)
                .filter(|r| eq_ci(r.artist(), &album.artist));
            if let Some(release) = release {
                library.add_release(release.clone());
            }
        }

        for rated in &self.rated_songs {
            let Ok(rating) = u8::try_from(rated.rating) else {
                continue;
            };
            for track in library.tracks_by_title(&rated.title) {
                if eq_ci(&track.artist, &rated.artist) {
                    // Out-of-range document ratings fail here and drop out.
                    library.rate(&track, rating);
                }
            }
        }

        for playlist in &self.playlists {
            library.create_playlist(playlist.name.as_str());
            for entry in &playlist.songs {
                let members: Vec<Track> = library
                    .tracks_by_title(&entry.title)
                    .into_iter()
                    .filter(|t| eq_ci(&t.artist, &entry.artist))
                    .collect();
                if let Some(target) = library.playlist_mut(&playlist.name) {
                    for member in members {
                        target.add_track(member);
                    }
                }
            }
        }

        // The document stores the recency list most-recent-first; replay
        // oldest-first so the recovered order matches the saved one.
        for song in self.recently_played_songs.iter().rev() {
            if let Some(track) = resolve_library_track(&library, song) {
                library.restore_recent(track);
            }
        }

        for song in &self.frequently_played_songs {
            if let Some(track) = resolve_library_track(&library, song) {
                library.restore_frequent(track);
            }
        }

        library
    }
}

/// First catalog track matching all three identity fields
/// case-insensitively.
fn resolve_catalog_track(catalog: &Catalog, song: &TrackRef) -> Option<Track> {
    catalog
        .tracks_by_title(&song.title)
        .iter()
        .find(|t| eq_ci(&t.artist, &song.artist) && eq_ci(&t.release_title, &song.release_title))
        .cloned()
}

/// First rebuilt-library track matching all three identity fields
/// case-insensitively.
fn resolve_library_track(library: &Library, song: &TrackRef) -> Option<Track> {
    library
        .tracks_by_title(&song.title)
        .into_iter()
        .find(|t| eq_ci(&t.artist, &song.artist) && eq_ci(&t.release_title, &song.release_title))
}
