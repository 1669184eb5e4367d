//! # Pomotimer Core Library
//!
//! This library provides the core logic for the pomotimer Pomodoro timer.
//! The CLI binary is a thin terminal layer over the same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven phase state machine (focus, break,
//!   long break) that requires the caller to invoke `tick()` once per second
//! - **Storage**: SQLite table of daily completion counters and TOML-based
//!   configuration
//! - **Session**: Glue that records every completed phase in the store
//! - **Stats**: Dense per-day report for the bar chart
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`StatsDb`]: Daily counter persistence
//! - [`Config`]: Application configuration management
//! - [`Session`]: Engine plus recorder

pub mod error;
pub mod events;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, TimerError, ValidationError};
pub use events::Event;
pub use session::{Clock, FixedClock, Session, SystemClock};
pub use stats::{Totals, WeeklyReport};
pub use storage::{CompletionRecorder, Config, DailyStats, StatsDb};
pub use timer::{Phase, PhaseDurations, TimerEngine, TimerState};
