//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not own a clock
//! or a thread - the caller is responsible for calling `tick()` once per
//! second while the timer runs, and for dropping its tick source when the
//! engine stops.
//!
//! ## Phase Transitions
//!
//! ```text
//! Focus(c < N) -> Break -> Focus(c + 1)          auto-restart
//! Focus(c = N) -> [awaiting] -yes-> LongBreak -> Focus(1), stopped
//!                            -no--> Focus(1), stopped
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(PhaseDurations::default(), 4);
//! engine.start()?;
//! // Once per second:
//! for event in engine.tick() { /* record completions */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::phase::{Phase, PhaseDurations};
use crate::error::TimerError;
use crate::events::Event;

/// Fixed tick resolution.
pub const TICK_MS: u64 = 1000;

/// Focus phases per cycle before a long break is offered.
pub const DEFAULT_CYCLES_BEFORE_LONG_BREAK: u32 = 4;

/// Observable state of the timer.
///
/// `0 <= time_left_ms <= total_ms` and `1 <= cycle <= cycles_before_long_break`
/// hold after every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub time_left_ms: u64,
    pub total_ms: u64,
    pub cycle: u32,
    pub running: bool,
    /// Last focus of the cycle is done and the long break is not yet
    /// accepted or declined. Never set while running.
    pub awaiting_long_break: bool,
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    durations: PhaseDurations,
    cycles_before_long_break: u32,
    state: TimerState,
}

impl TimerEngine {
    /// Create a stopped engine at Focus, cycle 1, with the full focus duration.
    pub fn new(durations: PhaseDurations, cycles_before_long_break: u32) -> Self {
        Self {
            durations,
            cycles_before_long_break: cycles_before_long_break.max(1),
            state: TimerState {
                phase: Phase::Focus,
                time_left_ms: durations.focus_ms,
                total_ms: durations.focus_ms,
                cycle: 1,
                running: false,
                awaiting_long_break: false,
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn cycle(&self) -> u32 {
        self.state.cycle
    }

    pub fn time_left_ms(&self) -> u64 {
        self.state.time_left_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.state.total_ms
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn awaiting_long_break(&self) -> bool {
        self.state.awaiting_long_break
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    pub fn cycles_before_long_break(&self) -> u32 {
        self.cycles_before_long_break
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume the countdown. Returns `None` when already running.
    pub fn start(&mut self) -> Result<Option<Event>, TimerError> {
        if self.state.awaiting_long_break {
            return Err(TimerError::AwaitingLongBreak {
                cycle: self.state.cycle,
            });
        }
        if self.state.running {
            return Ok(None);
        }
        self.state.running = true;
        debug!(phase = %self.state.phase, remaining_ms = self.state.time_left_ms, "timer started");
        Ok(Some(Event::TimerStarted {
            phase: self.state.phase,
            cycle: self.state.cycle,
            remaining_ms: self.state.time_left_ms,
            at: Utc::now(),
        }))
    }

    /// Stop the countdown, keeping the remaining time. `None` when stopped.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        debug!(remaining_ms = self.state.time_left_ms, "timer paused");
        Some(Event::TimerPaused {
            phase: self.state.phase,
            remaining_ms: self.state.time_left_ms,
            at: Utc::now(),
        })
    }

    /// Back to Focus, cycle 1, full focus duration, stopped.
    pub fn reset(&mut self) -> Event {
        self.state.cycle = 1;
        self.state.awaiting_long_break = false;
        self.load(Phase::Focus, false);
        info!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance the countdown by one tick. Returns the events produced by a
    /// phase transition, or nothing while the phase is still counting down.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.state.running {
            return Vec::new();
        }
        self.state.time_left_ms = self.state.time_left_ms.saturating_sub(TICK_MS);
        if self.state.time_left_ms > 0 {
            return Vec::new();
        }
        self.complete_phase()
    }

    /// Accept the pending long break and start it.
    pub fn confirm_long_break(&mut self) -> Result<Event, TimerError> {
        self.take_pending()?;
        Ok(self.load(Phase::LongBreak, true))
    }

    /// Skip the pending long break: Focus, cycle 1, stopped.
    pub fn decline_long_break(&mut self) -> Result<Event, TimerError> {
        self.take_pending()?;
        self.state.cycle = 1;
        self.load(Phase::Focus, false);
        info!("long break declined");
        Ok(Event::LongBreakDeclined { at: Utc::now() })
    }

    /// Replace the phase lengths. The running countdown keeps its length;
    /// the new values apply from the next phase entry.
    pub fn set_durations(&mut self, durations: PhaseDurations) {
        self.durations = durations;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn take_pending(&mut self) -> Result<(), TimerError> {
        if !self.state.awaiting_long_break {
            return Err(TimerError::NoPendingLongBreak {
                phase: self.state.phase,
            });
        }
        self.state.awaiting_long_break = false;
        Ok(())
    }

    fn complete_phase(&mut self) -> Vec<Event> {
        let finished = self.state.phase;
        let cycle = self.state.cycle;
        info!(phase = %finished, cycle, "phase completed");

        let mut events = vec![Event::PhaseCompleted {
            phase: finished,
            cycle,
            at: Utc::now(),
        }];

        match finished {
            Phase::Focus if cycle >= self.cycles_before_long_break => {
                self.state.running = false;
                self.state.awaiting_long_break = true;
                events.push(Event::LongBreakPending {
                    cycle,
                    at: Utc::now(),
                });
            }
            Phase::Focus => events.push(self.load(Phase::Break, true)),
            Phase::Break => {
                self.state.cycle = (cycle + 1).min(self.cycles_before_long_break);
                events.push(self.load(Phase::Focus, true));
            }
            Phase::LongBreak => {
                self.state.cycle = 1;
                events.push(self.load(Phase::Focus, false));
            }
        }
        events
    }

    fn load(&mut self, phase: Phase, running: bool) -> Event {
        let total = self.durations.for_phase(phase);
        self.state.phase = phase;
        self.state.total_ms = total;
        self.state.time_left_ms = total;
        self.state.running = running;
        Event::PhaseStarted {
            phase,
            cycle: self.state.cycle,
            duration_ms: total,
            running,
            at: Utc::now(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(PhaseDurations::default(), DEFAULT_CYCLES_BEFORE_LONG_BREAK)
    }
}
