//! Display formatting helpers

/// Format a number of seconds as `minutes:seconds`
///
/// Seconds are zero-padded to two digits, minutes are not padded and keep
/// growing past 59 (`3725` → `62:05`). Fractional seconds are truncated.
/// Negative and non-finite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(125.0), "2:05");
    }

    #[test]
    fn zero_and_whole_minutes() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn truncates_fractions() {
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(61.5), "1:01");
    }

    #[test]
    fn minutes_are_not_wrapped_into_hours() {
        assert_eq!(format_time(3725.0), "62:05");
    }

    #[test]
    fn invalid_input_renders_zero() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }
}
