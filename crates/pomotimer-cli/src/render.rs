//! Text rendering for the terminal: the progress ring, the status line and
//! the weekly bar chart.

use pomotimer_core::timer::format_clock;
use pomotimer_core::{Phase, TimerState, WeeklyReport};

const RING: [char; 5] = ['○', '◔', '◑', '◕', '●'];
const GAUGE_WIDTH: usize = 20;
const CHART_WIDTH: u32 = 30;

/// Quarter-step ring glyph for a fill fraction.
pub fn ring_glyph(fraction: f64) -> char {
    let idx = (fraction.clamp(0.0, 1.0) * 4.0).floor() as usize;
    RING[idx.min(RING.len() - 1)]
}

/// `[#####---------------]` style gauge.
pub fn gauge(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    )
}

pub fn status_line(state: &TimerState, cycles: u32, fraction: f64) -> String {
    let status = if state.awaiting_long_break {
        "waiting"
    } else if state.running {
        "running"
    } else {
        "paused"
    };
    format!(
        "{} {} {:<10} {}  cycle {}/{}  {:>3}%  ({})",
        ring_glyph(fraction),
        gauge(fraction),
        state.phase.label(),
        format_clock(state.time_left_ms),
        state.cycle,
        cycles,
        (fraction * 100.0).round() as u32,
        status
    )
}

fn bar(count: u32, peak: u32) -> String {
    if peak == 0 || count == 0 {
        return String::new();
    }
    let len = ((count * CHART_WIDTH) + peak - 1) / peak;
    "█".repeat(len as usize)
}

/// Three bars per day (focus, break, long break) scaled to the busiest
/// counter in the window, followed by totals.
pub fn bar_chart(report: &WeeklyReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Sessions {} .. {}\n", report.from, report.to));
    if report.is_empty() {
        out.push_str("No completed sessions yet.\n");
        return out;
    }

    let peak = report.peak();
    for day in &report.days {
        let heading = day.date.format("%a %m-%d").to_string();
        for (i, phase) in Phase::ALL.iter().enumerate() {
            let label = if i == 0 { heading.as_str() } else { "" };
            let count = day.count(*phase);
            out.push_str(&format!(
                "{:<9} {:<10} {} {}\n",
                label,
                phase.label(),
                bar(count, peak),
                count
            ));
        }
    }
    out.push_str(&format!(
        "Total: {} focus, {} breaks, {} long breaks\n",
        report.totals.focus, report.totals.breaks, report.totals.long_breaks
    ));
    out
}
