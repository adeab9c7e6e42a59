//! End-to-end tests for the interactive player
//!
//! Drives the command loop with scripted input against a JSON catalog on
//! disk and checks what a user would see.

use groove_catalog::JsonCatalogProvider;
use groove_cli::{repl, Command, Player, Reply};
use groove_playback::{RepeatMode, SessionConfig, TransportState};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"name": "Rock", "tracks": [
        {"id": 1, "title": "Intro", "artist": "The Band", "duration": 30, "url": "/music/rock/intro.mp3"},
        {"id": 2, "title": "Anthem", "artist": "The Band", "duration": 240, "url": "/music/rock/anthem.mp3"},
        {"id": 3, "title": "Encore", "artist": "Guest Star", "duration": 95, "url": "/music/rock/encore.mp3"}
    ]},
    {"name": "Jazz", "tracks": [
        {"id": 1, "title": "Naima", "artist": "John Coltrane", "duration": 261, "url": "/music/jazz/naima.mp3"}
    ]}
]"#;

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("catalog.json");
    fs::write(&path, CATALOG).unwrap();
    path
}

fn player(dir: &TempDir) -> Player {
    let provider = JsonCatalogProvider::new(write_catalog(dir.path()));
    let config = SessionConfig {
        shuffle_seed: Some(1),
        ..SessionConfig::default()
    };
    Player::new(Box::new(provider), config, 1.0)
}

fn run_script(player: &mut Player, script: &str) -> String {
    let mut out = Vec::new();
    repl::run(player, Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn first_playlist_is_selected_on_start() {
    let dir = TempDir::new().unwrap();
    let player = player(&dir);

    assert_eq!(player.session().selected_playlist(), Some("Rock"));
    assert_eq!(player.session().state(), TransportState::Idle);
}

#[test]
fn scripted_session() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);

    let output = run_script(
        &mut player,
        "tracks\nplay 2\nstatus\nsearch guest\nnext\nquit\nplay 1\n",
    );

    assert!(output.contains("  2. Anthem - The Band [4:00]"));
    assert!(output.contains("Now playing: Anthem - The Band"));
    assert!(output.contains("Playing: Anthem - The Band"));
    assert!(output.contains("Now playing: Encore - Guest Star"));

    // Nothing after quit runs
    assert_eq!(
        player.session().current_track().map(|t| t.title.as_str()),
        Some("Encore")
    );
}

#[test]
fn errors_are_printed_and_loop_continues() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);

    let output = run_script(&mut player, "toggle\nplay 9\ndance\nselect Polka\nvolume 0.5\n");

    assert!(output.contains("No track loaded"));
    assert!(output.contains("Queue index out of bounds: 8"));
    assert!(output.contains("Unknown command: dance"));
    assert!(output.contains("Playlist not found: Polka"));
    assert!(output.contains("Volume: 50%"));
    assert_eq!(player.session().volume(), 0.5);
}

#[test]
fn empty_search_shows_empty_state() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);

    let output = run_script(&mut player, "search zzz\n");
    assert!(output.contains("No matching songs found"));
}

#[test]
fn status_json_is_a_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);
    player.execute(Command::Play(1)).unwrap();

    let Reply::Text(json) = player.execute(Command::Status { json: true }).unwrap() else {
        panic!("expected text reply");
    };
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["state"], "playing");
    assert_eq!(value["now_playing"]["title"], "Intro");
    assert_eq!(value["queue"].as_array().unwrap().len(), 3);
}

#[test]
fn simulated_end_of_track_advances() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);
    player.execute(Command::Play(1)).unwrap();
    player.sync(Instant::now());

    let notices = player.sync(Instant::now() + Duration::from_secs(31));

    assert_eq!(notices, vec!["Now playing: Anthem - The Band".to_string()]);
    assert_eq!(player.session().elapsed(), 0.0);
    assert!(player.session().is_playing());
}

#[test]
fn simulated_end_of_last_track_stops() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);
    player.execute(Command::Select("Jazz".to_string())).unwrap();
    player.execute(Command::Play(1)).unwrap();

    player.sync(Instant::now() + Duration::from_secs(300));

    let session = player.session();
    assert_eq!(session.state(), TransportState::Paused);
    assert_eq!(session.elapsed(), 0.0);
    assert_eq!(session.current_track().map(|t| t.title.as_str()), Some("Naima"));
}

#[test]
fn repeat_one_replays_after_end() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);
    player.execute(Command::Repeat).unwrap();
    player.execute(Command::Repeat).unwrap();
    assert_eq!(player.session().repeat(), RepeatMode::One);

    player.execute(Command::Play(1)).unwrap();
    player.sync(Instant::now() + Duration::from_secs(31));

    let session = player.session();
    assert_eq!(session.current_track().map(|t| t.title.as_str()), Some("Intro"));
    assert!(session.is_playing());
    assert_eq!(session.elapsed(), 0.0);
}

#[test]
fn reload_picks_up_catalog_changes() {
    let dir = TempDir::new().unwrap();
    let mut player = player(&dir);
    player.execute(Command::Play(1)).unwrap();

    fs::write(
        dir.path().join("catalog.json"),
        r#"[{"name": "Pop", "tracks": [{"id": 1, "title": "Hit", "duration": 180, "url": "/music/pop/hit.mp3"}]}]"#,
    )
    .unwrap();
    let Reply::Text(text) = player.execute(Command::Reload).unwrap() else {
        panic!("expected text reply");
    };

    assert!(text.contains("* Pop (1 tracks)"));
    let session = player.session();
    assert_eq!(session.selected_playlist(), Some("Pop"));
    assert_eq!(session.current_track().map(|t| t.title.as_str()), Some("Intro"));
    assert!(session.is_playing());
}

#[test]
fn missing_catalog_starts_empty() {
    let dir = TempDir::new().unwrap();
    let provider = JsonCatalogProvider::new(dir.path().join("missing.json"));
    let mut player = Player::new(Box::new(provider), SessionConfig::default(), 1.0);

    assert!(player.session().catalog().is_empty());
    let output = run_script(&mut player, "playlists\ntracks\nnext\n");
    assert!(output.contains("No playlists found"));
    assert!(output.contains("No songs found"));
    assert!(output.contains("Queue is empty"));
}
