//! Fill fraction for the circular progress ring.
//!
//! Presentation only: the ring moves in whole-second steps, except during
//! the final second where it fills smoothly so that it is full exactly when
//! the countdown hits zero.

use super::engine::TICK_MS;

/// Fraction of the ring to fill, in `0.0..=1.0`.
///
/// `since_tick_ms` is the wall time elapsed since the last tick was applied.
pub fn ring_fraction(time_left_ms: u64, total_ms: u64, since_tick_ms: u64) -> f64 {
    let total_secs = total_ms / TICK_MS;
    if total_secs == 0 {
        return 0.0;
    }
    if time_left_ms == 0 {
        return 1.0;
    }

    let left_secs = time_left_ms / TICK_MS;
    let mut fraction = 1.0 - left_secs as f64 / total_secs as f64;

    if left_secs <= 1 {
        // Interpolate across the last second.
        let within = since_tick_ms.min(TICK_MS) as f64 / TICK_MS as f64;
        let from = 1.0 - 1.0 / total_secs as f64;
        fraction = fraction.max(from + (1.0 - from) * within);
    }

    fraction.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_at_start_full_at_zero() {
        assert_eq!(ring_fraction(10_000, 10_000, 0), 0.0);
        assert_eq!(ring_fraction(0, 10_000, 0), 1.0);
    }

    #[test]
    fn whole_second_steps_ignore_elapsed() {
        let a = ring_fraction(5_000, 10_000, 0);
        let b = ring_fraction(5_000, 10_000, 900);
        assert_eq!(a, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn last_second_fills_smoothly() {
        let start = ring_fraction(1_000, 10_000, 0);
        let mid = ring_fraction(1_000, 10_000, 500);
        let end = ring_fraction(1_000, 10_000, 1_000);
        assert!((start - 0.9).abs() < 1e-9);
        assert!(mid > start && mid < end);
        assert!((end - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_is_empty() {
        assert_eq!(ring_fraction(0, 0, 0), 0.0);
    }
}
