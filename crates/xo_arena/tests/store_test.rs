//! Tests for the statistics store.

use std::time::Duration;
use tempfile::TempDir;
use xo_arena::StatsStore;
use xo_engine::{Arena, ClockRules, GameMode, Player, Statistics, TournamentConfig};

fn played_statistics() -> Statistics {
    let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
    let rules = ClockRules::default().with_budget(Duration::from_secs(5));
    let mut arena = Arena::new(config).with_clock(rules);

    arena.apply_move(0, 4).expect("Move failed");
    arena.record_move_time(Player::X, Duration::from_millis(250));
    arena.tick_clock(Player::O, Duration::from_secs(10));
    arena.statistics().clone()
}

#[test]
fn test_empty_store_loads_empty_statistics() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = StatsStore::new(dir.path().join("xo_stats.json"));

    assert!(store.load_record().expect("Load failed").is_none());
    assert_eq!(store.load().expect("Load failed"), Statistics::new());
}

#[test]
fn test_statistics_survive_save_and_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = StatsStore::new(dir.path().join("nested").join("xo_stats.json"));
    let statistics = played_statistics();
    assert_eq!(*statistics.player(Player::X).wins(), 1);

    let saved = store.save(&statistics).expect("Save failed");
    let record = store.load_record().expect("Load failed").expect("No record");

    assert_eq!(record.statistics(), &statistics);
    assert_eq!(record.saved_at(), saved.saved_at());
    assert_eq!(store.load().expect("Load failed"), statistics);
}

#[test]
fn test_clear_removes_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = StatsStore::new(dir.path().join("xo_stats.json"));

    store.save(&played_statistics()).expect("Save failed");
    assert!(store.path().exists());

    store.clear().expect("Clear failed");
    assert!(!store.path().exists());
    store.clear().expect("Clearing twice should succeed");
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("xo_stats.json");
    std::fs::write(&path, "{ not json").expect("Write failed");

    let err = StatsStore::new(path).load().expect_err("Load should fail");
    assert!(err.message.starts_with("JSON error"));
}
