//! Interactive menu front end.
//!
//! A thin collaborator around the catalog, library and store: every
//! command maps onto exactly one of their operations, failures print a
//! reason and return to the menu, and nothing here panics or holds state
//! of its own.

use std::io::{self, BufRead, Write};

use crate::catalog::Catalog;
use crate::library::Library;
use crate::model::{Release, Track};
use crate::persist::LibraryStore;

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn fmt_track(track: &Track) -> String {
    format!("{} - {} ({})", track.title, track.artist, track.release_title)
}

/// Runs the top-level login loop until the user quits or stdin closes.
pub fn run(catalog: &Catalog, store: &LibraryStore) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    writeln!(out, "Welcome to vivace!")?;
    loop {
        writeln!(out)?;
        writeln!(out, "1) Log in")?;
        writeln!(out, "2) List saved users")?;
        writeln!(out, "3) Quit")?;
        let Some(choice) = prompt(&mut out, &mut input, "Select an option: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(user) = prompt(&mut out, &mut input, "User name: ")? else {
                    return Ok(());
                };
                if user.is_empty() {
                    writeln!(out, "User name must not be empty.")?;
                    continue;
                }
                let mut library = match store.load(&user, catalog) {
                    Ok(Some(library)) => {
                        writeln!(out, "Loaded saved library for {user}.")?;
                        library
                    }
                    Ok(None) => {
                        writeln!(out, "No saved library for {user}; starting fresh.")?;
                        Library::new()
                    }
                    Err(err) => {
                        writeln!(out, "Could not load saved library ({err}); starting fresh.")?;
                        Library::new()
                    }
                };
                session(&user, &mut library, catalog, store, &mut input, &mut out)?;
            }
            "2" => {
                let users = store.saved_users();
                if users.is_empty() {
                    writeln!(out, "No saved users yet.")?;
                } else {
                    for user in users {
                        writeln!(out, "  {user}")?;
                    }
                }
            }
            "3" => return Ok(()),
            other => writeln!(out, "Unknown option '{other}'.")?,
        }
    }
}

fn print_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "1) Search catalog: songs by title      2) songs by artist")?;
    writeln!(out, "3) Search catalog: release by title    4) releases by artist")?;
    writeln!(out, "5) Search library: songs by title      6) songs by artist")?;
    writeln!(out, "7) Search library: releases by title   8) releases by artist")?;
    writeln!(out, "9) Show a playlist")?;
    writeln!(out, "a) Add song          b) Add release      c) List library")?;
    writeln!(out, "d) Create playlist   e) Add to playlist  f) Remove from playlist")?;
    writeln!(out, "g) Mark favorite     h) Rate song        i) Play song")?;
    writeln!(out, "j) Remove song       k) Remove release   l) Shuffle library")?;
    writeln!(out, "m) Shuffle playlist  n) Songs by genre   o) Release info for song")?;
    writeln!(out, "p) Sorted songs      q) Rebuild auto playlists")?;
    writeln!(out, "r) Recently/frequently played           s) Save")?;
    writeln!(out, "x) Save and log out")?;
    Ok(())
}

fn session(
    user: &str,
    library: &mut Library,
    catalog: &Catalog,
    store: &LibraryStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    loop {
        print_menu(out)?;
        let Some(command) = prompt(out, input, "Enter a command: ")? else {
            save(user, library, store, out)?;
            return Ok(());
        };

        match command.to_lowercase().as_str() {
            "1" => {
                let Some(title) = prompt(out, input, "Song title: ")? else { continue };
                print_tracks(out, catalog.tracks_by_title(&title))?;
            }
            "2" => {
                let Some(artist) = prompt(out, input, "Artist: ")? else { continue };
                print_tracks(out, catalog.tracks_by_artist(&artist))?;
            }
            "3" => {
                let Some(title) = prompt(out, input, "Release title: ")? else { continue };
                match catalog.release_by_title(&title) {
                    Some(release) => print_release(out, release)?,
                    None => writeln!(out, "No matches.")?,
                }
            }
            "4" => {
                let Some(artist) = prompt(out, input, "Artist: ")? else { continue };
                let releases = catalog.releases_by_artist(&artist);
                if releases.is_empty() {
                    writeln!(out, "No matches.")?;
                }
                for release in releases {
                    print_release(out, release)?;
                }
            }
            "5" => {
                let Some(title) = prompt(out, input, "Song title: ")? else { continue };
                print_tracks(out, &library.tracks_by_title(&title))?;
            }
            "6" => {
                let Some(artist) = prompt(out, input, "Artist: ")? else { continue };
                print_tracks(out, &library.tracks_by_artist(&artist))?;
            }
            "7" => {
                let Some(title) = prompt(out, input, "Release title: ")? else { continue };
                let releases = library.releases_by_title(&title);
                if releases.is_empty() {
                    writeln!(out, "No matches.")?;
                }
                for release in &releases {
                    print_release(out, release)?;
                }
            }
            "8" => {
                let Some(artist) = prompt(out, input, "Artist: ")? else { continue };
                let releases = library.releases_by_artist(&artist);
                if releases.is_empty() {
                    writeln!(out, "No matches.")?;
                }
                for release in &releases {
                    print_release(out, release)?;
                }
            }
            "9" => {
                let Some(name) = prompt(out, input, "Playlist name: ")? else { continue };
                match library
                    .playlist(&name)
                    .or_else(|| library.genre_auto_playlist(&name))
                {
                    Some(playlist) => {
                        writeln!(out, "{}:", playlist.name())?;
                        print_tracks(out, playlist.tracks())?;
                    }
                    None => writeln!(out, "No playlist named '{name}'.")?,
                }
            }
            "a" => {
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                let matches: Vec<Track> = catalog
                    .tracks_by_title(&title)
                    .iter()
                    .filter(|t| eq_ci(&t.artist, &artist))
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    writeln!(out, "That song is not in the catalog.")?;
                } else {
                    let count = matches.len();
                    for track in matches {
                        library.add_track(track, catalog);
                    }
                    writeln!(out, "Added {count} song(s) to your library.")?;
                }
            }
            "b" => {
                let Some((title, artist)) = prompt_release(out, input)? else { continue };
                match catalog
                    .release_by_title(&title)
                    .filter(|r| eq_ci(r.artist(), &artist))
                {
                    Some(release) => {
                        library.add_release(release.clone());
                        writeln!(out, "Added '{}' and its songs.", release.title())?;
                    }
                    None => writeln!(out, "That release is not in the catalog.")?,
                }
            }
            "c" => list_library(out, library)?,
            "d" => {
                let Some(name) = prompt(out, input, "New playlist name: ")? else { continue };
                if name.is_empty() {
                    writeln!(out, "Playlist name must not be empty.")?;
                } else {
                    library.create_playlist(name);
                    writeln!(out, "Playlist created.")?;
                }
            }
            "e" => {
                let Some(name) = prompt(out, input, "Playlist name: ")? else { continue };
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                let Some(track) = find_library_track(library, &title, &artist) else {
                    writeln!(out, "That song is not in your library.")?;
                    continue;
                };
                match library.playlist_mut(&name) {
                    Some(playlist) => {
                        playlist.add_track(track);
                        writeln!(out, "Added to '{name}'.")?;
                    }
                    None => writeln!(out, "No playlist named '{name}'.")?,
                }
            }
            "f" => {
                let Some(name) = prompt(out, input, "Playlist name: ")? else { continue };
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                let Some(track) = find_library_track(library, &title, &artist) else {
                    writeln!(out, "That song is not in your library.")?;
                    continue;
                };
                match library.playlist_mut(&name) {
                    Some(playlist) => {
                        if playlist.remove_track(&track) {
                            writeln!(out, "Removed from '{name}'.")?;
                        } else {
                            writeln!(out, "'{name}' does not contain that song.")?;
                        }
                    }
                    None => writeln!(out, "No playlist named '{name}'.")?,
                }
            }
            "g" => {
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                let Some(track) = find_library_track(library, &title, &artist) else {
                    writeln!(out, "That song is not in your library.")?;
                    continue;
                };
                if library.mark_favorite(&track) {
                    writeln!(out, "Marked as favorite.")?;
                } else {
                    writeln!(out, "That song is not in your library.")?;
                }
            }
            "h" => {
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                let Some(rating) = prompt(out, input, "Rating (1-5): ")? else { continue };
                let Ok(rating) = rating.parse::<u8>() else {
                    writeln!(out, "Rating must be a number from 1 to 5.")?;
                    continue;
                };
                let Some(track) = find_library_track(library, &title, &artist) else {
                    writeln!(out, "That song is not in your library.")?;
                    continue;
                };
                if library.rate(&track, rating) {
                    writeln!(out, "Rated {} at {rating}.", track.title)?;
                } else {
                    writeln!(out, "Rating must be from 1 to 5 for a library song.")?;
                }
            }
            "i" => {
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                // Playback matches the exact spelling, unlike the searches.
                if library.play(&title, &artist) {
                    writeln!(out, "Playing {title}.")?;
                } else {
                    writeln!(out, "No library song matches that exact title and artist.")?;
                }
            }
            "j" => {
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                let Some(track) = find_library_track(library, &title, &artist) else {
                    writeln!(out, "That song is not in your library.")?;
                    continue;
                };
                if library.remove_track(&track) {
                    writeln!(out, "Removed {}.", track.title)?;
                }
            }
            "k" => {
                let Some((title, artist)) = prompt_release(out, input)? else { continue };
                match library.release(&title, &artist).cloned() {
                    Some(release) => {
                        library.remove_release(&release);
                        writeln!(out, "Removed '{}' and its songs.", release.title())?;
                    }
                    None => writeln!(out, "That release is not in your library.")?,
                }
            }
            "l" => print_tracks(out, &library.shuffled())?,
            "m" => {
                let Some(name) = prompt(out, input, "Playlist name: ")? else { continue };
                match library.playlist(&name) {
                    Some(playlist) => print_tracks(out, &playlist.shuffled())?,
                    None => writeln!(out, "No playlist named '{name}'.")?,
                }
            }
            "n" => {
                let Some(genre) = prompt(out, input, "Genre: ")? else { continue };
                print_tracks(out, &library.tracks_by_genre(&genre))?;
            }
            "o" => {
                let Some((title, artist)) = prompt_song(out, input)? else { continue };
                match library.release_info(&title, &artist, catalog) {
                    Some(release) => {
                        print_release(out, release)?;
                        if library.owns_release(release.title(), release.artist()) {
                            writeln!(out, "This release is in your library.")?;
                        } else {
                            writeln!(out, "This release is not in your library.")?;
                        }
                    }
                    None => writeln!(out, "No catalog release found for that library song.")?,
                }
            }
            "p" => {
                let Some(order) = prompt(out, input, "Sort by (t)itle, (a)rtist or (r)ating: ")?
                else {
                    continue;
                };
                match order.as_str() {
                    "t" => print_tracks(out, &library.sorted_by_title())?,
                    "a" => print_tracks(out, &library.sorted_by_artist())?,
                    "r" => print_tracks(out, &library.sorted_by_rating())?,
                    other => writeln!(out, "Unknown sort order '{other}'.")?,
                }
            }
            "q" => {
                library.rebuild_auto_playlists();
                writeln!(out, "Auto playlists rebuilt.")?;
            }
            "r" => {
                writeln!(out, "Recently played:")?;
                print_tracks(out, &library.recently_played())?;
                writeln!(out, "Frequently played:")?;
                print_tracks(out, &library.frequently_played())?;
            }
            "s" => save(user, library, store, out)?,
            "x" => {
                save(user, library, store, out)?;
                return Ok(());
            }
            other => writeln!(out, "Unknown command '{other}'.")?,
        }
    }
}

fn save(
    user: &str,
    library: &Library,
    store: &LibraryStore,
    out: &mut impl Write,
) -> io::Result<()> {
    match store.save(user, library) {
        Ok(()) => writeln!(out, "Library saved."),
        Err(err) => writeln!(out, "Could not save your library: {err}"),
    }
}

fn list_library(out: &mut impl Write, library: &Library) -> io::Result<()> {
    writeln!(out, "Songs:")?;
    print_tracks(out, library.tracks())?;
    writeln!(out, "Artists:")?;
    for artist in library.artists() {
        writeln!(out, "  {artist}")?;
    }
    writeln!(out, "Releases:")?;
    for release in library.releases() {
        writeln!(out, "  {} - {}", release.title(), release.artist())?;
    }
    writeln!(out, "Playlists:")?;
    for playlist in library.playlists() {
        writeln!(out, "  {} ({} songs)", playlist.name(), playlist.tracks().len())?;
    }
    writeln!(out, "Favorites:")?;
    print_tracks(out, library.favorites())?;
    Ok(())
}

/// First library song matching title and artist case-insensitively.
fn find_library_track(library: &Library, title: &str, artist: &str) -> Option<Track> {
    library
        .tracks_by_title(title)
        .into_iter()
        .find(|t| eq_ci(&t.artist, artist))
}

fn print_tracks(out: &mut impl Write, tracks: &[Track]) -> io::Result<()> {
    if tracks.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for track in tracks {
        writeln!(out, "  {}", fmt_track(track))?;
    }
    Ok(())
}

fn print_release(out: &mut impl Write, release: &Release) -> io::Result<()> {
    writeln!(
        out,
        "{} - {} [{} / {}]",
        release.title(),
        release.artist(),
        release.genre(),
        release.year()
    )?;
    for track in release.tracks() {
        writeln!(out, "  {}", track.title)?;
    }
    Ok(())
}

fn prompt(out: &mut impl Write, input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        // stdin closed
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_song(
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> io::Result<Option<(String, String)>> {
    let Some(title) = prompt(out, input, "Song title: ")? else {
        return Ok(None);
    };
    let Some(artist) = prompt(out, input, "Artist: ")? else {
        return Ok(None);
    };
    Ok(Some((title, artist)))
}

fn prompt_release(
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> io::Result<Option<(String, String)>> {
    let Some(title) = prompt(out, input, "Release title: ")? else {
        return Ok(None);
    };
    let Some(artist) = prompt(out, input, "Artist: ")? else {
        return Ok(None);
    };
    Ok(Some((title, artist)))
}
