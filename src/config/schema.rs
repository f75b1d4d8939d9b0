use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vivace/config.toml` or `~/.config/vivace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub store: StoreSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings::default(),
            store: StoreSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Path of the line-oriented release index (`ReleaseTitle, Artist`
    /// per line).
    pub index_path: PathBuf,
    /// Directory holding one release document per index line.
    pub releases_dir: PathBuf,
    /// Release-document extension, without dot.
    pub extension: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("albums.txt"),
            releases_dir: PathBuf::from("albums"),
            extension: "txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory holding one `library_<user>.json` document per user.
    pub data_dir: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}
