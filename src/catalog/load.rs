use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::model::{Release, Track};

use super::model::{Catalog, CatalogError};

impl Catalog {
    /// Loads the catalog from an index file plus one release document per
    /// index line.
    ///
    /// Index format: `ReleaseTitle, Artist` per line, fields trimmed,
    /// extra fields ignored. The release document lives at
    /// `<releases_dir>/<ReleaseTitle>_<Artist>.<extension>`; its first
    /// line is `Title, Artist, Genre, Year`, the remaining non-blank
    /// lines one track title each.
    ///
    /// Malformed index lines and missing or malformed release documents
    /// are skipped and counted (see [`Catalog::skipped_entries`]). Only a
    /// failure to read the index file itself is an error.
    pub fn load(
        index_path: &Path,
        releases_dir: &Path,
        extension: &str,
    ) -> Result<Catalog, CatalogError> {
        let index = fs::read_to_string(index_path).map_err(|source| CatalogError::Index {
            path: index_path.to_path_buf(),
            source,
        })?;

        let mut catalog = Catalog::empty();
        for line in index.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((release_title, artist)) = parse_index_line(line) else {
                catalog.note_skipped();
                warn!(line, "skipping malformed catalog index line");
                continue;
            };

            let doc_path = releases_dir.join(format!("{release_title}_{artist}.{extension}"));
            let doc = match fs::read_to_string(&doc_path) {
                Ok(doc) => doc,
                Err(err) => {
                    catalog.note_skipped();
                    warn!(path = %doc_path.display(), error = %err, "skipping unreadable release document");
                    continue;
                }
            };
            if !catalog.ingest_release_document(&doc) {
                catalog.note_skipped();
                warn!(path = %doc_path.display(), "skipping malformed release document");
            }
        }

        debug!(
            skipped = catalog.skipped_entries(),
            "catalog loaded from {}",
            index_path.display()
        );
        Ok(catalog)
    }

    /// Parses and indexes one release document. Returns false when the
    /// document is empty or its heading is malformed.
    fn ingest_release_document(&mut self, doc: &str) -> bool {
        let mut lines = doc.lines();
        let Some(heading) = lines.next() else {
            return false;
        };
        let fields: Vec<&str> = heading.split(',').collect();
        if fields.len() < 4 {
            return false;
        }
        let title = fields[0].trim();
        let artist = fields[1].trim();
        let genre = fields[2].trim();
        let Ok(year) = fields[3].trim().parse::<i32>() else {
            return false;
        };

        let mut tracks = Vec::new();
        for line in lines {
            let track_title = line.trim();
            if !track_title.is_empty() {
                tracks.push(Track::new(track_title, artist, title));
            }
        }

        self.index_release(Release::new(title, artist, genre, year, tracks));
        true
    }
}

/// Splits an index line into its first two comma-separated fields. Lines
/// with fewer than two fields are malformed.
fn parse_index_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split(',');
    let title = fields.next()?.trim();
    let artist = fields.next()?.trim();
    Some((title, artist))
}
