use std::error::Error;

use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod history;
mod library;
mod model;
mod persist;
mod view;

use catalog::Catalog;
use config::Settings;
use persist::LibraryStore;

fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics go to stderr so they never interleave with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load()?;
    settings.validate()?;

    // A catalog that cannot be read at all is fatal; malformed entries
    // inside it are skipped and counted.
    let catalog = Catalog::load(
        &settings.catalog.index_path,
        &settings.catalog.releases_dir,
        &settings.catalog.extension,
    )?;

    let store = LibraryStore::new(&settings.store.data_dir);
    view::run(&catalog, &store)?;
    Ok(())
}
