use super::*;
use crate::catalog::Catalog;
use crate::model::{Release, Track};

fn uh_oh() -> Track {
    Track::new("Uh Oh", "Norah Jones", "Begin Again")
}

fn daydreamer() -> Track {
    Track::new("Daydreamer", "Adele", "19")
}

fn take_it_all() -> Track {
    Track::new("Take It All", "Adele", "21")
}

fn rolling() -> Track {
    Track::new("Rolling in the Deep", "Adele", "21")
}

fn release_21() -> Release {
    Release::new(
        "21",
        "Adele",
        "Pop",
        2011,
        vec![rolling(), Track::new("Rumour Has It", "Adele", "21"), take_it_all()],
    )
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::empty();
    catalog.index_release(release_21());
    catalog.index_release(Release::new(
        "19",
        "Adele",
        "Pop",
        2008,
        vec![daydreamer()],
    ));
    catalog
}

/// Library preloaded with a two-track test release, mirroring the most
/// common starting state of the interactive flows.
fn library_with_test_release() -> Library {
    let mut library = Library::new();
    library.add_release(Release::new(
        "test release",
        "test artist",
        "test genre",
        2000,
        vec![uh_oh(), daydreamer()],
    ));
    library
}

#[test]
fn add_track_inserts_track_and_artist_idempotently() {
    let catalog = catalog();
    let mut library = Library::new();

    library.add_track(uh_oh(), &catalog);
    library.add_track(uh_oh(), &catalog);

    assert_eq!(library.tracks().len(), 1);
    assert!(library.contains(&uh_oh()));
    assert_eq!(library.artists(), vec!["Norah Jones".to_string()]);
}

#[test]
fn add_track_synthesizes_partial_release_with_catalog_metadata() {
    let catalog = catalog();
    let mut library = Library::new();

    library.add_track(take_it_all(), &catalog);

    let release = library.release("21", "Adele").unwrap();
    assert_eq!(release.genre(), "Pop");
    assert_eq!(release.year(), 2011);
    assert_eq!(release.tracks(), &[take_it_all()]);
}

#[test]
fn add_track_synthesizes_unknown_release_when_catalog_has_no_match() {
    let catalog = catalog();
    let mut library = Library::new();

    let stray = Track::new("Purple Rain", "Prince", "Purple Rain");
    library.add_track(stray.clone(), &catalog);

    let release = library.release("Purple Rain", "Prince").unwrap();
    assert_eq!(release.genre(), "Unknown");
    assert_eq!(release.year(), 0);
    assert_eq!(release.tracks(), &[stray]);
}

#[test]
fn add_track_appends_to_existing_owned_release() {
    let catalog = catalog();
    let mut library = Library::new();

    library.add_track(rolling(), &catalog);
    library.add_track(take_it_all(), &catalog);

    assert_eq!(library.releases().len(), 1);
    let release = library.release("21", "Adele").unwrap();
    assert_eq!(release.tracks(), &[rolling(), take_it_all()]);
}

#[test]
fn add_release_adds_release_and_all_tracks() {
    let library = library_with_test_release();

    assert_eq!(library.releases().len(), 1);
    assert_eq!(library.tracks().len(), 2);
    assert_eq!(
        library.artists(),
        vec!["Adele".to_string(), "Norah Jones".to_string()]
    );
}

#[test]
fn add_release_twice_merges_track_union_into_one_release() {
    let mut library = Library::new();
    let first = Release::new("21", "Adele", "Pop", 2011, vec![rolling()]);
    let second = Release::new("21", "Adele", "Pop", 2011, vec![take_it_all(), rolling()]);

    library.add_release(first);
    library.add_release(second);

    assert_eq!(library.releases().len(), 1);
    let merged = library.release("21", "Adele").unwrap();
    assert_eq!(merged.tracks(), &[rolling(), take_it_all()]);
    assert_eq!(library.tracks().len(), 2);
}

#[test]
fn add_release_merges_case_insensitively_on_title_and_artist() {
    let mut library = Library::new();
    library.add_release(Release::new("21", "Adele", "Pop", 2011, vec![rolling()]));
    library.add_release(Release::new("21", "ADELE", "Pop", 2011, vec![take_it_all()]));

    assert_eq!(library.releases().len(), 1);
}

#[test]
fn remove_track_cascades_into_favorites_playlists_and_trackers() {
    let mut library = library_with_test_release();

    library.rate(&uh_oh(), 5);
    library.create_playlist("Morning");
    library.playlist_mut("Morning").unwrap().add_track(uh_oh());
    library.play("Uh Oh", "Norah Jones");

    assert!(library.remove_track(&uh_oh()));

    assert!(!library.contains(&uh_oh()));
    assert!(library.favorites().is_empty());
    assert!(library.playlist("Morning").unwrap().tracks().is_empty());
    assert!(library.recently_played().is_empty());
    assert!(library.frequently_played().is_empty());
    assert_eq!(library.rating(&uh_oh()), None);
    assert_eq!(library.play_count(&uh_oh()), 0);
    // Norah Jones had no other owned track; Adele still does.
    assert_eq!(library.artists(), vec!["Adele".to_string()]);

    // Unowned tracks are a no-op failure.
    assert!(!library.remove_track(&take_it_all()));
}

#[test]
fn remove_release_cascades_track_removal() {
    let mut library = library_with_test_release();
    let release = library.release("test release", "test artist").unwrap().clone();

    assert!(library.remove_release(&release));

    assert!(library.releases().is_empty());
    assert!(library.tracks().is_empty());
    assert!(library.artists().is_empty());
    assert!(!library.remove_release(&release));
}

#[test]
fn rate_rejects_out_of_range_ratings_and_unowned_tracks() {
    let mut library = library_with_test_release();

    assert!(!library.rate(&uh_oh(), 0));
    assert!(!library.rate(&uh_oh(), 6));
    assert!(!library.rate(&take_it_all(), 3));
    assert_eq!(library.rating(&uh_oh()), None);
}

#[test]
fn rating_five_favorites_and_lower_ratings_unfavorite() {
    let mut library = library_with_test_release();

    assert!(library.rate(&uh_oh(), 5));
    assert!(library.rate(&uh_oh(), 5));
    assert_eq!(library.favorites(), &[uh_oh()]);

    assert!(library.rate(&uh_oh(), 3));
    assert!(library.favorites().is_empty());
    assert_eq!(library.rating(&uh_oh()), Some(3));
}

#[test]
fn mark_favorite_is_independent_of_rating_until_a_non_five_rating() {
    let mut library = library_with_test_release();

    assert!(!library.mark_favorite(&take_it_all()));
    assert!(library.mark_favorite(&uh_oh()));
    assert!(library.mark_favorite(&uh_oh()));
    assert_eq!(library.favorites(), &[uh_oh()]);

    // Only an explicit non-5 rating clears the mark.
    assert!(library.rate(&uh_oh(), 2));
    assert!(library.favorites().is_empty());
}

#[test]
fn favorite_scenario_from_the_store_release() {
    let catalog = catalog();
    let mut library = Library::new();
    library.add_release(catalog.release_by_title("21").unwrap().clone());

    assert!(library.rate(&rolling(), 5));
    assert!(library.favorites().contains(&rolling()));

    assert!(!library.rate(&rolling(), 6));
    assert!(library.favorites().contains(&rolling()));
    assert_eq!(library.rating(&rolling()), Some(5));
}

#[test]
fn queries_are_case_insensitive_and_fresh() {
    let library = library_with_test_release();

    assert_eq!(library.tracks_by_title("uh oh"), vec![uh_oh()]);
    assert_eq!(library.tracks_by_artist("ADELE"), vec![daydreamer()]);
    assert_eq!(library.releases_by_title("TEST RELEASE").len(), 1);
    assert_eq!(library.releases_by_artist("Test Artist").len(), 1);
    assert!(library.tracks_by_title("nonexistent").is_empty());
}

#[test]
fn tracks_by_genre_concatenates_matching_releases() {
    let mut library = library_with_test_release();
    library.add_release(Release::new(
        "21",
        "Adele",
        "Pop",
        2011,
        vec![rolling()],
    ));

    let found = library.tracks_by_genre("TEST GENRE");
    assert_eq!(found, vec![uh_oh(), daydreamer()]);
    assert!(library.tracks_by_genre("Rock").is_empty());
}

#[test]
fn sorted_views_are_stable_and_exclude_unrated_from_rating_sort() {
    let catalog = catalog();
    let mut library = library_with_test_release();
    library.add_track(take_it_all(), &catalog);

    assert_eq!(
        library.sorted_by_title().iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
        vec!["Daydreamer", "Take It All", "Uh Oh"]
    );
    assert_eq!(
        library.sorted_by_artist().iter().map(|t| t.artist.as_str()).collect::<Vec<_>>(),
        vec!["Adele", "Adele", "Norah Jones"]
    );

    library.rate(&take_it_all(), 2);
    library.rate(&daydreamer(), 5);
    library.rate(&uh_oh(), 4);
    assert_eq!(
        library.sorted_by_rating(),
        vec![take_it_all(), uh_oh(), daydreamer()]
    );
}

#[test]
fn shuffled_is_a_permutation_of_owned_tracks() {
    let catalog = catalog();
    let mut library = library_with_test_release();
    library.add_track(take_it_all(), &catalog);

    let shuffled = library.shuffled();
    assert_eq!(shuffled.len(), 3);
    for track in library.tracks() {
        assert!(shuffled.contains(track));
    }
}

#[test]
fn play_updates_counts_and_both_trackers() {
    let mut library = library_with_test_release();

    assert!(library.play("Uh Oh", "Norah Jones"));
    assert_eq!(library.play_count(&uh_oh()), 1);
    assert_eq!(library.recently_played(), vec![uh_oh()]);
    assert_eq!(library.frequently_played(), vec![uh_oh()]);

    assert!(library.play("Daydreamer", "Adele"));
    assert_eq!(library.recently_played(), vec![daydreamer(), uh_oh()]);

    assert!(library.play("Uh Oh", "Norah Jones"));
    assert!(library.play("Uh Oh", "Norah Jones"));
    assert_eq!(library.play_count(&uh_oh()), 3);
    assert_eq!(library.frequently_played()[0], uh_oh());
    assert_eq!(library.recently_played()[0], uh_oh());
}

#[test]
fn play_matches_exact_case_only() {
    let mut library = library_with_test_release();

    assert!(!library.play("uh oh", "Norah Jones"));
    assert!(!library.play("Uh Oh", "norah jones"));
    assert!(!library.play("Missing", "Nobody"));
    assert_eq!(library.play_count(&uh_oh()), 0);
    assert!(library.recently_played().is_empty());
}

#[test]
fn play_hits_every_exact_match_across_releases() {
    let catalog = catalog();
    let mut library = Library::new();
    let live = Track::new("Rolling in the Deep", "Adele", "Live at the Royal Albert Hall");
    library.add_track(rolling(), &catalog);
    library.add_track(live.clone(), &catalog);

    assert!(library.play("Rolling in the Deep", "Adele"));
    assert_eq!(library.play_count(&rolling()), 1);
    assert_eq!(library.play_count(&live), 1);
    assert_eq!(library.recently_played().len(), 2);
}

#[test]
fn auto_playlists_are_absent_before_the_first_rebuild() {
    let library = library_with_test_release();
    assert!(library.favorites_auto_playlist().is_none());
    assert!(library.top_rated_auto_playlist().is_none());
    assert!(library.genre_auto_playlist("test genre").is_none());
}

#[test]
fn auto_playlists_cover_favorites_and_top_rated() {
    let mut library = library_with_test_release();
    library.mark_favorite(&daydreamer());
    library.rate(&uh_oh(), 4);

    library.rebuild_auto_playlists();

    let faves = library.favorites_auto_playlist().unwrap();
    assert_eq!(faves.tracks(), &[daydreamer()]);

    let top = library.top_rated_auto_playlist().unwrap();
    assert_eq!(top.tracks(), &[uh_oh()]);
}

#[test]
fn genre_auto_playlist_requires_ten_aggregated_tracks() {
    let catalog = catalog();
    let mut library = library_with_test_release();

    // 2 tracks so far; 7 more leaves the genre one short of the threshold.
    for i in 0..7 {
        library.add_track(
            Track::new(format!("test track {i}"), "test artist", "test release"),
            &catalog,
        );
    }
    library.rebuild_auto_playlists();
    assert!(library.genre_auto_playlist("test genre").is_none());

    library.add_track(
        Track::new("test track 7", "test artist", "test release"),
        &catalog,
    );
    library.rebuild_auto_playlists();

    let auto = library.genre_auto_playlist("TEST GENRE").unwrap();
    assert_eq!(auto.name(), "test genre (Auto)");
    assert_eq!(auto.tracks().len(), 10);
}

#[test]
fn rebuild_replaces_auto_playlists_wholesale() {
    let mut library = library_with_test_release();
    library.mark_favorite(&uh_oh());
    library.rebuild_auto_playlists();
    assert_eq!(library.favorites_auto_playlist().unwrap().tracks().len(), 1);

    library.rate(&uh_oh(), 1);
    library.rebuild_auto_playlists();
    assert!(library.favorites_auto_playlist().unwrap().tracks().is_empty());
}

#[test]
fn release_info_resolves_the_catalog_release_for_an_owned_track() {
    let catalog = catalog();
    let mut library = library_with_test_release();

    // "Daydreamer" is owned through "test release" but its release title
    // points at the catalog release "19".
    let info = library.release_info("daydreamer", "ADELE", &catalog).unwrap();
    assert_eq!(info.title(), "19");
    assert_eq!(info.artist(), "Adele");
    assert!(!library.owns_release(info.title(), info.artist()));

    assert!(library.release_info("Uh Oh", "Norah Jones", &catalog).is_none());
    assert!(library.release_info("Missing", "Nobody", &catalog).is_none());

    library.add_release(catalog.release_by_title("19").unwrap().clone());
    assert!(library.owns_release("19", "Adele"));
}
