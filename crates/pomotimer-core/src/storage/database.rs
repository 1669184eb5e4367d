//! SQLite-based daily statistics.
//!
//! One row per calendar day with three counters: completed focus, break
//! and long-break phases. Rows appear on the first completion of a day
//! and only ever grow until [`StatsDb::reset_all`].

use std::path::Path;

use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result};
use crate::stats::MAX_REPORT_DAYS;
use crate::timer::Phase;

/// Counters for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub focus_count: u32,
    pub break_count: u32,
    pub long_break_count: u32,
}

impl DailyStats {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            focus_count: 0,
            break_count: 0,
            long_break_count: 0,
        }
    }

    pub fn count(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_count,
            Phase::Break => self.break_count,
            Phase::LongBreak => self.long_break_count,
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get(0)?,
            focus_count: row.get(1)?,
            break_count: row.get(2)?,
            long_break_count: row.get(3)?,
        })
    }
}

/// Sink for finished phases. The session forwards every completion here.
pub trait CompletionRecorder {
    fn record(&mut self, phase: Phase, today: NaiveDate) -> Result<()>;
}

/// SQLite database for the daily counters.
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/pomotimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("pomotimer.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened stats database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Add one to the `kind` counter of `today`, creating the row at zero
    /// first if this is the day's first completion.
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub fn increment_count(&self, kind: Phase, today: NaiveDate) -> Result<()> {
        let (focus, brk, long_break) = match kind {
            Phase::Focus => (1, 0, 0),
            Phase::Break => (0, 1, 0),
            Phase::LongBreak => (0, 0, 1),
        };
        self.conn.execute(
            "INSERT INTO stats (date, focus_count, break_count, long_break_count)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                focus_count      = focus_count + excluded.focus_count,
                break_count      = break_count + excluded.break_count,
                long_break_count = long_break_count + excluded.long_break_count",
            params![today, focus, brk, long_break],
        )?;
        debug!(kind = %kind, %today, "incremented daily count");
        Ok(())
    }

    /// All rows dated on or after `today - n days`, oldest first. `n` is
    /// clamped to [`MAX_REPORT_DAYS`].
    pub fn query_last_n_days(&self, n: u32, today: NaiveDate) -> Result<Vec<DailyStats>> {
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(n.min(MAX_REPORT_DAYS))))
            .unwrap_or(today);
        let mut stmt = self.conn.prepare(
            "SELECT date, focus_count, break_count, long_break_count
             FROM stats
             WHERE date >= ?1
             ORDER BY date ASC",
        )?;
        let rows = stmt
            .query_map(params![cutoff], DailyStats::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// The row for a single day, if any phase completed on it.
    pub fn day(&self, date: NaiveDate) -> Result<Option<DailyStats>> {
        let row = self
            .conn
            .query_row(
                "SELECT date, focus_count, break_count, long_break_count
                 FROM stats WHERE date = ?1",
                params![date],
                DailyStats::from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Delete every row. Returns how many days were removed.
    pub fn reset_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM stats", [])?;
        info!(removed, "daily stats reset");
        Ok(removed)
    }
}

impl CompletionRecorder for StatsDb {
    fn record(&mut self, phase: Phase, today: NaiveDate) -> Result<()> {
        self.increment_count(phase, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn first_increment_creates_row() {
        let db = StatsDb::open_memory().unwrap();
        let today = date("2024-03-10");
        assert!(db.day(today).unwrap().is_none());

        db.increment_count(Phase::Break, today).unwrap();
        let row = db.day(today).unwrap().unwrap();
        assert_eq!(row.focus_count, 0);
        assert_eq!(row.break_count, 1);
        assert_eq!(row.long_break_count, 0);
    }

    #[test]
    fn increments_accumulate_per_kind() {
        let db = StatsDb::open_memory().unwrap();
        let today = date("2024-03-10");
        for _ in 0..3 {
            db.increment_count(Phase::Focus, today).unwrap();
        }
        db.increment_count(Phase::LongBreak, today).unwrap();

        let row = db.day(today).unwrap().unwrap();
        assert_eq!(row.count(Phase::Focus), 3);
        assert_eq!(row.count(Phase::Break), 0);
        assert_eq!(row.count(Phase::LongBreak), 1);
    }

    #[test]
    fn date_is_stored_as_iso_text() {
        let db = StatsDb::open_memory().unwrap();
        db.increment_count(Phase::Focus, date("2024-03-10")).unwrap();
        let raw: String = db
            .conn()
            .query_row("SELECT date FROM stats", [], |r| r.get(0))
            .unwrap();
        assert_eq!(raw, "2024-03-10");
    }

    #[test]
    fn query_window_is_inclusive_and_ordered() {
        let db = StatsDb::open_memory().unwrap();
        let today = date("2024-03-10");
        for d in ["2024-03-10", "2024-03-01", "2024-03-03", "2024-03-02"] {
            db.increment_count(Phase::Focus, date(d)).unwrap();
        }

        let rows = db.query_last_n_days(7, today).unwrap();
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2024-03-03"), date("2024-03-10")]);
    }

    #[test]
    fn huge_window_is_clamped() {
        let db = StatsDb::open_memory().unwrap();
        let today = date("2024-03-10");
        db.increment_count(Phase::Focus, today).unwrap();
        db.increment_count(Phase::Focus, date("2023-03-10")).unwrap();
        db.increment_count(Phase::Focus, date("2020-01-01")).unwrap();

        let rows = db.query_last_n_days(u32::MAX, today).unwrap();
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2023-03-10"), today]);
    }

    #[test]
    fn reset_all_removes_everything() {
        let db = StatsDb::open_memory().unwrap();
        let today = date("2024-03-10");
        db.increment_count(Phase::Focus, today).unwrap();
        db.increment_count(Phase::Focus, date("2024-03-09")).unwrap();

        assert_eq!(db.reset_all().unwrap(), 2);
        assert!(db.query_last_n_days(7, today).unwrap().is_empty());
    }

    #[test]
    fn recorder_impl_increments() {
        let mut db = StatsDb::open_memory().unwrap();
        let today = date("2024-03-10");
        db.record(Phase::Break, today).unwrap();
        assert_eq!(db.day(today).unwrap().unwrap().break_count, 1);
    }
}
