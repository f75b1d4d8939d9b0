/// A single song, identified by its title, artist and release title.
///
/// Equality and hashing are structural over all three fields
/// (case-sensitive): two tracks with identical fields are the same track
/// for every containment check in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub release_title: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        release_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            release_title: release_title.into(),
        }
    }
}
