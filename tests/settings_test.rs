//! Tests for loading settings files.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use rocknraft::Settings;
use rocknraft_engine::{Board, BoardError, Difficulty, Player, UserRef};

fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("rocknraft.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_full_settings_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(
        &dir,
        r#"width = 4
height = 4
difficulty = "easy"
empty_cells = 2
memorize_seconds = 2
seed = 77
"#,
    );

    let settings = Settings::from_file(&path).expect("Load failed");
    assert_eq!(*settings.difficulty(), Difficulty::Easy);
    assert_eq!(settings.memorize_time(), Duration::from_secs(14));

    let config = settings.board_config();
    assert_eq!(config.total_cells(), 16);
    assert_eq!(config.occupied_cells(), 14);
    assert_eq!(config.seed, Some(77));

    let players = [Player::human(UserRef::new("1", "alice")), Player::surrogate()];
    let board = Board::new("k".into(), config, players).expect("Settings should deal");
    assert_eq!(board.selectable_cells().count(), 14);
}

#[test]
fn test_oversized_grid_in_file_is_rejected_by_the_board() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(&dir, "width = 9223372036854775807\nheight = 2\n");

    let settings = Settings::from_file(&path).expect("Load failed");
    let players = [Player::human(UserRef::new("1", "alice")), Player::surrogate()];
    let result = Board::new("k".into(), settings.board_config(), players);
    assert!(matches!(result, Err(BoardError::InvalidConfiguration(_))));
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(&dir, "");
    assert_eq!(Settings::from_file(&path).expect("Load failed"), Settings::default());
}

#[test]
fn test_unknown_difficulty_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(&dir, "difficulty = \"nightmare\"\n");

    let err = Settings::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse settings"));
    assert!(err.to_string().starts_with("Settings error:"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = Settings::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read settings file"));
}

#[test]
fn test_overrides_apply() {
    let settings = Settings::default()
        .with_difficulty(Difficulty::Hard)
        .with_seed(4);
    let config = settings.board_config();
    assert_eq!(config.difficulty, Difficulty::Hard);
    assert_eq!(config.seed, Some(4));
}
