mod duration;
mod engine;
mod phase;
pub mod progress;

pub use duration::{format_clock, parse_duration_secs, MAX_PHASE_SECS};
pub use engine::{TimerEngine, TimerState, DEFAULT_CYCLES_BEFORE_LONG_BREAK, TICK_MS};
pub use phase::{Phase, PhaseDurations};
