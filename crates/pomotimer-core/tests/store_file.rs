//! File-backed store tests.

use chrono::NaiveDate;
use pomotimer_core::{Phase, StatsDb};
use tempfile::TempDir;

#[test]
fn test_counts_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pomotimer.db");
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

    {
        let db = StatsDb::open_at(&path).unwrap();
        db.increment_count(Phase::Focus, day).unwrap();
        db.increment_count(Phase::Focus, day).unwrap();
    }

    let db = StatsDb::open_at(&path).unwrap();
    db.increment_count(Phase::Break, day).unwrap();
    let row = db.day(day).unwrap().unwrap();
    assert_eq!(row.focus_count, 2);
    assert_eq!(row.break_count, 1);
}

#[test]
fn test_open_at_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/pomotimer.db");
    assert!(StatsDb::open_at(&path).is_err());
}
