//! Timer engine wired to the daily stats.
//!
//! A [`Session`] owns the engine, a [`CompletionRecorder`] and a [`Clock`].
//! Each `PhaseCompleted` the engine emits is recorded against the clock's
//! current local date before the events are handed back to the caller.

use chrono::{Local, NaiveDate};

use crate::error::Result;
use crate::events::Event;
use crate::storage::CompletionRecorder;
use crate::timer::{PhaseDurations, TimerEngine, TimerState};

/// Source of "today" for stats keys.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same day. Handy in tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct Session<R, C = SystemClock> {
    engine: TimerEngine,
    recorder: R,
    clock: C,
}

impl<R: CompletionRecorder> Session<R, SystemClock> {
    pub fn new(engine: TimerEngine, recorder: R) -> Self {
        Self::with_clock(engine, recorder, SystemClock)
    }
}

impl<R: CompletionRecorder, C: Clock> Session<R, C> {
    pub fn with_clock(engine: TimerEngine, recorder: R, clock: C) -> Self {
        Self {
            engine,
            recorder,
            clock,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> TimerState {
        self.engine.snapshot()
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn start(&mut self) -> Result<Option<Event>> {
        Ok(self.engine.start()?)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    pub fn reset(&mut self) -> Event {
        self.engine.reset()
    }

    /// Advance one second and record any completed phase.
    ///
    /// # Errors
    /// Returns the store error if a completion could not be recorded. The
    /// engine has already transitioned at that point.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        let events = self.engine.tick();
        for phase in events.iter().filter_map(Event::completed_phase) {
            self.recorder.record(phase, self.clock.today())?;
        }
        Ok(events)
    }

    pub fn confirm_long_break(&mut self) -> Result<Event> {
        Ok(self.engine.confirm_long_break()?)
    }

    pub fn decline_long_break(&mut self) -> Result<Event> {
        Ok(self.engine.decline_long_break()?)
    }

    pub fn set_durations(&mut self, durations: PhaseDurations) {
        self.engine.set_durations(durations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    #[derive(Default)]
    struct Log(Vec<(Phase, NaiveDate)>);

    impl CompletionRecorder for Log {
        fn record(&mut self, phase: Phase, today: NaiveDate) -> Result<()> {
            self.0.push((phase, today));
            Ok(())
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn each_completion_is_recorded_once() {
        let engine = TimerEngine::new(PhaseDurations::from_secs(1, 1, 1), 4);
        let mut session = Session::with_clock(engine, Log::default(), FixedClock(day()));
        session.start().unwrap();
        for _ in 0..3 {
            session.tick().unwrap();
        }
        assert_eq!(
            session.recorder().0,
            vec![(Phase::Focus, day()), (Phase::Break, day()), (Phase::Focus, day())]
        );
    }

    #[test]
    fn nothing_recorded_while_paused() {
        let engine = TimerEngine::new(PhaseDurations::from_secs(1, 1, 1), 4);
        let mut session = Session::with_clock(engine, Log::default(), FixedClock(day()));
        for _ in 0..5 {
            session.tick().unwrap();
        }
        assert!(session.recorder().0.is_empty());
    }

    #[test]
    fn timer_errors_surface_as_core_errors() {
        let engine = TimerEngine::new(PhaseDurations::from_secs(1, 1, 1), 4);
        let mut session = Session::with_clock(engine, Log::default(), FixedClock(day()));
        assert!(matches!(
            session.confirm_long_break(),
            Err(crate::error::CoreError::Timer(_))
        ));
    }
}
