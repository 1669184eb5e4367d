//! Parsing and formatting of phase lengths typed by the user.
//!
//! Accepted forms: `MM:SS`, unit-suffixed parts (`1h`, `25m`, `90s`,
//! `1m30s`) and a bare integer, which counts as minutes.

use crate::error::ValidationError;

/// Upper bound for any single phase.
pub const MAX_PHASE_SECS: u64 = 24 * 60 * 60;

/// Parse a duration string into whole seconds.
///
/// Zero and anything above [`MAX_PHASE_SECS`] are rejected.
pub fn parse_duration_secs(input: &str) -> Result<u64, ValidationError> {
    let s = input.trim().to_ascii_lowercase();
    let invalid = |message: &str| ValidationError::InvalidDuration {
        input: input.to_string(),
        message: message.to_string(),
    };

    if s.is_empty() {
        return Err(invalid("empty input"));
    }

    let secs = if let Some((min, sec)) = s.split_once(':') {
        let min: u64 = min.parse().map_err(|_| invalid("minutes must be a number"))?;
        let sec: u64 = sec.parse().map_err(|_| invalid("seconds must be a number"))?;
        if sec >= 60 {
            return Err(invalid("seconds must be below 60"));
        }
        min.saturating_mul(60).saturating_add(sec)
    } else if s.chars().all(|c| c.is_ascii_digit()) {
        let min: u64 = s.parse().map_err(|_| invalid("number too large"))?;
        min.saturating_mul(60)
    } else {
        let mut total: u64 = 0;
        let mut num = String::new();
        for c in s.chars() {
            match c {
                '0'..='9' => num.push(c),
                'h' | 'm' | 's' => {
                    let n: u64 = num.parse().map_err(|_| invalid("missing number before unit"))?;
                    let unit = match c {
                        'h' => 3600,
                        'm' => 60,
                        _ => 1,
                    };
                    total = total.saturating_add(n.saturating_mul(unit));
                    num.clear();
                }
                _ => return Err(invalid("expected MM:SS or a value like 25m, 90s, 1m30s")),
            }
        }
        if !num.is_empty() {
            return Err(invalid("trailing number without unit"));
        }
        total
    };

    if secs == 0 {
        return Err(invalid("duration must be greater than zero"));
    }
    if secs > MAX_PHASE_SECS {
        return Err(ValidationError::OutOfRange {
            field: "duration".into(),
            value: secs,
            min: 1,
            max: MAX_PHASE_SECS,
        });
    }
    Ok(secs)
}

/// `MM:SS` rendering of a millisecond countdown. Partial seconds round down.
pub fn format_clock(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_form() {
        assert_eq!(parse_duration_secs("25:00").unwrap(), 1500);
        assert_eq!(parse_duration_secs("0:02").unwrap(), 2);
    }

    #[test]
    fn parses_unit_suffixes() {
        assert_eq!(parse_duration_secs("25m").unwrap(), 1500);
        assert_eq!(parse_duration_secs("90s").unwrap(), 90);
        assert_eq!(parse_duration_secs("1m30s").unwrap(), 90);
        assert_eq!(parse_duration_secs("1h").unwrap(), 3600);
    }

    #[test]
    fn bare_number_is_minutes() {
        assert_eq!(parse_duration_secs("5").unwrap(), 300);
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert!(parse_duration_secs("").is_err());
        assert!(parse_duration_secs("abc").is_err());
        assert!(parse_duration_secs("0").is_err());
        assert!(parse_duration_secs("0:00").is_err());
        assert!(parse_duration_secs("1:75").is_err());
        assert!(parse_duration_secs("10x").is_err());
        assert!(parse_duration_secs("1m30").is_err());
    }

    #[test]
    fn rejects_more_than_a_day() {
        assert!(matches!(
            parse_duration_secs("25h"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(1_500_000), "25:00");
        assert_eq!(format_clock(61_999), "01:01");
        assert_eq!(format_clock(0), "00:00");
    }
}
