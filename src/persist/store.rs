use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::library::Library;

use super::document::LibraryDocument;

/// Directory of per-user library documents, one `library_<user>.json`
/// per user, overwritten wholesale on save.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read library document {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write library document {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("library document {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LibraryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn document_path(&self, user: &str) -> PathBuf {
        self.dir.join(format!("library_{user}.json"))
    }

    /// Serializes the library and overwrites the user's document with
    /// pretty-printed UTF-8 JSON. The store directory is created on
    /// demand.
    pub fn save(&self, user: &str, library: &Library) -> Result<(), StoreError> {
        let path = self.document_path(user);
        let document = LibraryDocument::encode(library);
        let json = serde_json::to_string_pretty(&document).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(user, path = %path.display(), "library saved");
        Ok(())
    }

    /// Loads the user's library, resolving its references against
    /// `catalog`. `Ok(None)` means no document exists yet. A read or
    /// parse failure never yields a partially populated library.
    pub fn load(&self, user: &str, catalog: &Catalog) -> Result<Option<Library>, StoreError> {
        let path = self.document_path(user);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        let document: LibraryDocument =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!(user, path = %path.display(), "library loaded");
        Ok(Some(document.decode(catalog)))
    }

    /// User identifiers with a saved document in the store directory,
    /// sorted.
    pub fn saved_users(&self) -> Vec<String> {
        let mut users: Vec<String> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .filter_map(|e| user_from_path(e.path()))
            .collect();
        users.sort();
        users
    }
}

fn user_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let user = name.strip_prefix("library_")?.strip_suffix(".json")?;
    if user.is_empty() {
        None
    } else {
        Some(user.to_string())
    }
}
