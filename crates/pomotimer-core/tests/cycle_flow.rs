//! Integration tests for a full focus/break cycle wired to the stats store.
//!
//! Uses short durations (focus=2s, break=1s, long break=3s, 4 cycles) and a
//! fixed clock so every completion lands on the same day.

use chrono::NaiveDate;
use pomotimer_core::{
    Event, FixedClock, Phase, PhaseDurations, Session, StatsDb, TimerEngine, WeeklyReport,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

fn session() -> Session<StatsDb, FixedClock> {
    let engine = TimerEngine::new(PhaseDurations::from_secs(2, 1, 3), 4);
    Session::with_clock(engine, StatsDb::open_memory().unwrap(), FixedClock(today()))
}

fn tick_until_quiet(session: &mut Session<StatsDb, FixedClock>) -> Vec<Event> {
    let mut events = Vec::new();
    while session.snapshot().running {
        events.extend(session.tick().unwrap());
    }
    events
}

#[test]
fn test_full_cycle_with_long_break() {
    let mut session = session();
    session.start().unwrap();

    // Runs unattended until the fourth focus asks for the long break.
    let events = tick_until_quiet(&mut session);
    let completed: Vec<Phase> = events.iter().filter_map(Event::completed_phase).collect();
    assert_eq!(
        completed,
        vec![
            Phase::Focus,
            Phase::Break,
            Phase::Focus,
            Phase::Break,
            Phase::Focus,
            Phase::Break,
            Phase::Focus,
        ]
    );
    let state = session.snapshot();
    assert!(state.awaiting_long_break);
    assert_eq!(state.cycle, 4);

    session.confirm_long_break().unwrap();
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::LongBreak);
    assert_eq!(state.time_left_ms, 3000);
    assert_eq!(state.cycle, 4);

    tick_until_quiet(&mut session);
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Focus);
    assert_eq!(state.cycle, 1);
    assert!(!state.running);

    let row = session.recorder().day(today()).unwrap().unwrap();
    assert_eq!(row.focus_count, 4);
    assert_eq!(row.break_count, 3);
    assert_eq!(row.long_break_count, 1);
}

#[test]
fn test_declining_long_break_records_no_long_break() {
    let mut session = session();
    session.start().unwrap();
    tick_until_quiet(&mut session);

    session.decline_long_break().unwrap();
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Focus);
    assert_eq!(state.cycle, 1);
    assert_eq!(state.time_left_ms, 2000);
    assert!(!state.running);

    let row = session.recorder().day(today()).unwrap().unwrap();
    assert_eq!(row.focus_count, 4);
    assert_eq!(row.long_break_count, 0);
}

#[test]
fn test_reset_mid_cycle_keeps_recorded_counts() {
    let mut session = session();
    session.start().unwrap();
    for _ in 0..4 {
        session.tick().unwrap();
    }
    session.reset();

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Focus);
    assert_eq!(state.cycle, 1);
    assert_eq!(state.time_left_ms, 2000);
    assert!(!state.running);

    let row = session.recorder().day(today()).unwrap().unwrap();
    assert_eq!(row.focus_count, 1);
    assert_eq!(row.break_count, 1);
}

#[test]
fn test_weekly_report_from_store() {
    let db = StatsDb::open_memory().unwrap();
    let today = today();
    db.increment_count(Phase::Focus, today).unwrap();
    db.increment_count(Phase::Focus, today.pred_opt().unwrap()).unwrap();
    db.increment_count(Phase::Focus, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        .unwrap();

    let rows = db.query_last_n_days(7, today).unwrap();
    let report = WeeklyReport::build(&rows, today, 7);
    assert_eq!(report.days.len(), 8);
    assert_eq!(report.totals.focus, 2);
}
