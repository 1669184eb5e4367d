//! Statistics module for pomotimer
//!
//! Turns the sparse rows of the daily stats table into a dense per-day
//! series for the bar chart, with totals per phase kind.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::DailyStats;
use crate::timer::Phase;

/// Days shown by default: the trailing week.
pub const DEFAULT_REPORT_DAYS: u32 = 7;

/// Widest window a report or query covers; larger requests are clamped.
pub const MAX_REPORT_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub focus: u32,
    pub breaks: u32,
    pub long_breaks: u32,
}

impl Totals {
    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus,
            Phase::Break => self.breaks,
            Phase::LongBreak => self.long_breaks,
        }
    }
}

/// Dense series covering `today - n ..= today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DailyStats>,
    pub totals: Totals,
}

impl WeeklyReport {
    /// Build the report from store rows. Days without a row appear with
    /// zero counts; rows outside the window are ignored.
    pub fn build(rows: &[DailyStats], today: NaiveDate, n: u32) -> Self {
        let n = n.min(MAX_REPORT_DAYS);
        let from = today
            .checked_sub_days(Days::new(u64::from(n)))
            .unwrap_or(today);

        let days: Vec<DailyStats> = from
            .iter_days()
            .take_while(|d| *d <= today)
            .map(|d| {
                rows.iter()
                    .find(|r| r.date == d)
                    .copied()
                    .unwrap_or_else(|| DailyStats::empty(d))
            })
            .collect();

        let totals = days.iter().fold(Totals::default(), |acc, d| Totals {
            focus: acc.focus.saturating_add(d.focus_count),
            breaks: acc.breaks.saturating_add(d.break_count),
            long_breaks: acc.long_breaks.saturating_add(d.long_break_count),
        });

        Self {
            from,
            to: today,
            days,
            totals,
        }
    }

    /// Largest single counter in the window, for scaling bars.
    pub fn peak(&self) -> u32 {
        self.days
            .iter()
            .flat_map(|d| Phase::ALL.map(|p| d.count(p)))
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.totals == Totals::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(d: &str, f: u32, b: u32, l: u32) -> DailyStats {
        DailyStats {
            date: date(d),
            focus_count: f,
            break_count: b,
            long_break_count: l,
        }
    }

    #[test]
    fn fills_missing_days_with_zero() {
        let rows = [row("2024-03-05", 2, 1, 0), row("2024-03-10", 4, 3, 1)];
        let report = WeeklyReport::build(&rows, date("2024-03-10"), 7);
        assert_eq!(report.days.len(), 8);
        assert_eq!(report.from, date("2024-03-03"));
        assert_eq!(report.days[0], DailyStats::empty(date("2024-03-03")));
        assert_eq!(report.days[2].focus_count, 2);
        assert_eq!(report.days[7].long_break_count, 1);
    }

    #[test]
    fn totals_and_peak() {
        let rows = [row("2024-03-09", 2, 1, 0), row("2024-03-10", 4, 3, 1)];
        let report = WeeklyReport::build(&rows, date("2024-03-10"), 7);
        assert_eq!(
            report.totals,
            Totals {
                focus: 6,
                breaks: 4,
                long_breaks: 1
            }
        );
        assert_eq!(report.totals.get(Phase::Break), 4);
        assert_eq!(report.peak(), 4);
        assert!(!report.is_empty());
    }

    #[test]
    fn ignores_rows_outside_window() {
        let rows = [row("2024-02-01", 9, 9, 9)];
        let report = WeeklyReport::build(&rows, date("2024-03-10"), 7);
        assert!(report.is_empty());
        assert_eq!(report.peak(), 0);
    }

    #[test]
    fn oversized_window_is_clamped() {
        let today = date("2024-03-10");
        let report = WeeklyReport::build(&[], today, u32::MAX);
        assert_eq!(report.days.len(), MAX_REPORT_DAYS as usize + 1);
        assert_eq!(report.from, date("2023-03-10"));
    }

    #[test]
    fn zero_days_is_just_today() {
        let report = WeeklyReport::build(&[], date("2024-03-10"), 0);
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.from, report.to);
    }
}
