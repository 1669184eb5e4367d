use serde::{Deserialize, Serialize};
use std::fmt;

/// The three countdown phases. Also the kind tag for daily stats counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    Break,
    LongBreak,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Focus, Phase::Break, Phase::LongBreak];

    /// Human-readable label used in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
            Self::LongBreak => "Long break",
        }
    }

    /// Message shown when a phase of this kind runs out.
    pub fn finished_message(&self) -> &'static str {
        match self {
            Self::Focus => "Focus time is over",
            Self::Break => "Break is over",
            Self::LongBreak => "Long break is over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Focus => "focus",
            Self::Break => "break",
            Self::LongBreak => "long break",
        };
        f.write_str(s)
    }
}

/// Configured length of each phase, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub focus_ms: u64,
    pub break_ms: u64,
    pub long_break_ms: u64,
}

impl PhaseDurations {
    pub fn from_secs(focus: u64, brk: u64, long_break: u64) -> Self {
        Self {
            focus_ms: focus.saturating_mul(1000),
            break_ms: brk.saturating_mul(1000),
            long_break_ms: long_break.saturating_mul(1000),
        }
    }

    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_ms,
            Phase::Break => self.break_ms,
            Phase::LongBreak => self.long_break_ms,
        }
    }
}

impl Default for PhaseDurations {
    /// 25 / 5 / 15 minutes.
    fn default() -> Self {
        Self::from_secs(25 * 60, 5 * 60, 15 * 60)
    }
}
