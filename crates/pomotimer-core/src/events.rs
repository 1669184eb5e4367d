use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change of the timer produces an Event.
/// The session records completions from them; the CLI renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        cycle: u32,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. One per finished phase; drives the stats.
    PhaseCompleted {
        phase: Phase,
        cycle: u32,
        at: DateTime<Utc>,
    },
    /// A new countdown was loaded after a transition.
    PhaseStarted {
        phase: Phase,
        cycle: u32,
        duration_ms: u64,
        running: bool,
        at: DateTime<Utc>,
    },
    /// The last focus of a cycle finished; waiting for the user to accept
    /// or decline the long break.
    LongBreakPending {
        cycle: u32,
        at: DateTime<Utc>,
    },
    LongBreakDeclined {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The finished phase, for `PhaseCompleted` events.
    pub fn completed_phase(&self) -> Option<Phase> {
        match self {
            Event::PhaseCompleted { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
